use crate::db::{parse_date, parse_hours, today};
use crate::preferences::{Labels, Palette};
use crate::render::warning;
use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

/// Date and hours as typed by the user, already checked for format.
pub struct EntryInput {
    pub date: String,
    pub hours: String,
}

/// Date the entry form starts from: the one given on the command line, else today.
pub fn date_or_today(date: Option<String>) -> String {
    date.unwrap_or_else(|| today().format("%Y-%m-%d").to_string())
}

pub fn prompt_entry(labels: &Labels, date: Option<String>) -> Result<EntryInput> {
    let theme = ColorfulTheme::default();
    let invalid_date = labels.error_date;
    let invalid_hours = labels.error_hours;

    let date: String = Input::with_theme(&theme)
        .with_prompt(labels.date.trim_end_matches(':'))
        .default(date_or_today(date))
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            parse_date(input).map(|_| ()).map_err(|_| invalid_date)
        })
        .interact_text()
        .context("Failed to read date")?;

    let hours: String = Input::with_theme(&theme)
        .with_prompt(labels.hours.trim_end_matches(':'))
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            parse_hours(input).map(|_| ()).map_err(|_| invalid_hours)
        })
        .interact_text()
        .context("Failed to read hours")?;

    Ok(EntryInput { date, hours })
}

/// Both questions must be answered yes; the first "no" cancels.
pub fn confirm_reset(labels: &Labels, palette: &Palette) -> Result<bool> {
    let theme = ColorfulTheme::default();

    println!(
        "{}",
        warning(&format!("{}: {}", labels.warning, labels.reset_button), palette)
    );

    for prompt in [labels.reset_confirm1, labels.reset_confirm2] {
        let confirmed = Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to read reset confirmation")?;

        if !confirmed {
            return Ok(false);
        }
    }

    Ok(true)
}
