pub mod prompts;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "study-tracker",
    about = "Record daily study hours and review weekly totals"
)]
pub struct Cli {
    /// Use this database file instead of the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record hours for a date (prompts for both when HOURS is omitted)
    Add {
        #[arg(allow_hyphen_values = true)]
        hours: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Total hours for an ISO week (current week by default)
    Total {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=53))]
        week: Option<u32>,
    },
    History,
    /// Delete every study entry after a two-step confirmation
    Reset {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    Show,
    Language { code: String },
    Theme { code: String },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    Set { key: String, value: String },
    Get { key: String },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, SettingsCommands};
    use clap::Parser;

    #[test]
    fn add_accepts_negative_looking_hours() {
        let cli = Cli::try_parse_from(["study-tracker", "add", "-1", "--date", "2024-01-10"])
            .expect("parsed");

        match cli.command {
            Commands::Add { hours, date } => {
                assert_eq!(hours.as_deref(), Some("-1"));
                assert_eq!(date.as_deref(), Some("2024-01-10"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn total_week_must_be_an_iso_week() {
        assert!(Cli::try_parse_from(["study-tracker", "total", "--week", "54"]).is_err());
        assert!(Cli::try_parse_from(["study-tracker", "total", "--week", "53"]).is_ok());
    }

    #[test]
    fn db_flag_is_global() {
        let cli = Cli::try_parse_from(["study-tracker", "settings", "theme", "dark", "--db", "x.db"])
            .expect("parsed");

        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("x.db")));
        assert!(matches!(
            cli.command,
            Commands::Settings {
                command: Some(SettingsCommands::Theme { .. })
            }
        ));
    }
}
