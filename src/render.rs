use crate::db::HistoryRow;
use crate::preferences::{Labels, Palette, hex_rgb};
use colored::{ColoredString, Colorize};
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}

/// Week / Year / Hours table, newest period first.
pub fn history_table(rows: &[HistoryRow], labels: &Labels) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        labels.week.to_string(),
        labels.year.to_string(),
        labels.hours.trim_end_matches(':').to_string(),
    ]);

    if rows.is_empty() {
        builder.push_record([labels.no_data.to_string(), String::new(), String::new()]);
    }
    rows.iter().for_each(|row| {
        builder.push_record([
            row.week.to_string(),
            row.year.to_string(),
            format_hours(row.total_hours),
        ]);
    });

    builder.build().with(Style::rounded()).to_string()
}

pub fn heading(text: &str, palette: &Palette) -> ColoredString {
    let styled = paint(text, palette.heading_fg).bold();
    match hex_rgb(palette.heading_bg) {
        Some((r, g, b)) => styled.on_truecolor(r, g, b),
        None => styled,
    }
}

pub fn warning(text: &str, palette: &Palette) -> ColoredString {
    paint(text, palette.danger_bg).bold()
}

/// One line per palette color with a swatch of the color itself.
pub fn palette_preview(palette: &Palette) -> String {
    palette
        .entries()
        .iter()
        .map(|(name, hex)| {
            let swatch = match hex_rgb(hex) {
                Some((r, g, b)) => "    ".on_truecolor(r, g, b),
                None => "    ".normal(),
            };
            format!("  {swatch} {name:<13}{hex}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_hours, history_table};
    use crate::db::HistoryRow;
    use crate::preferences::Language;

    #[test]
    fn hours_use_two_decimals() {
        assert_eq!(format_hours(3.0), "3.00");
        assert_eq!(format_hours(2.345), "2.35");
        assert_eq!(format_hours(0.0), "0.00");
    }

    fn cells(line: &str) -> Vec<&str> {
        line.split('│')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect()
    }

    #[test]
    fn history_table_lists_rows_in_order() {
        let rows = vec![
            HistoryRow {
                week: 24,
                year: 2024,
                total_hours: 2.0,
            },
            HistoryRow {
                week: 1,
                year: 2024,
                total_hours: 3.5,
            },
        ];

        let table = history_table(&rows, Language::English.labels());
        let body = table
            .lines()
            .filter(|line| line.contains('│'))
            .map(cells)
            .collect::<Vec<_>>();

        assert_eq!(
            body,
            vec![
                vec!["Week", "Year", "Hours studied"],
                vec!["24", "2024", "2.00"],
                vec!["1", "2024", "3.50"],
            ]
        );
        assert!(table.starts_with('╭'));
    }

    #[test]
    fn empty_history_shows_no_data_row() {
        let table = history_table(&[], Language::Spanish.labels());
        let body = table
            .lines()
            .filter(|line| line.contains('│'))
            .map(cells)
            .collect::<Vec<_>>();

        assert_eq!(
            body,
            vec![
                vec!["Semana", "Año", "Horas estudiadas"],
                vec!["Sin datos disponibles"],
            ]
        );
    }
}
