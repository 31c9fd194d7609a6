mod cli;
mod config;
mod db;
mod error;
mod preferences;
mod render;

use crate::cli::prompts::{self, EntryInput};
use crate::cli::{Cli, Commands, ConfigCommands, SettingsCommands};
use crate::config::{Config, expand_home};
use crate::db::StudyRecordStore;
use crate::error::ValidationError;
use crate::preferences::{Language, Preferences, Theme};
use crate::render::{format_hours, heading, history_table, palette_preview, warning};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Store plus the preferences it holds, opened once per command.
struct Session {
    store: StudyRecordStore,
    preferences: Preferences,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { command } => handle_config_command(command),
        Commands::Add { hours, date } => handle_add(&open_session(cli.db)?, hours, date),
        Commands::Total { week } => handle_total(&open_session(cli.db)?, week),
        Commands::History => handle_history(&open_session(cli.db)?),
        Commands::Reset { yes } => handle_reset(&open_session(cli.db)?, yes),
        Commands::Settings { command } => {
            handle_settings(open_session(cli.db)?, command.unwrap_or(SettingsCommands::Show))
        }
    }
}

fn open_session(db_override: Option<PathBuf>) -> Result<Session> {
    let mut config = Config::load_or_default()?;
    if let Some(path) = db_override {
        config.db_path = expand_home(&path.to_string_lossy());
    }
    config.ensure_bootstrap_files()?;

    let store = StudyRecordStore::open(&config.db_path)?;
    let preferences = Preferences::load(&store, config.default_preferences())
        .context("Failed to load preferences")?;

    info!(
        db = %store.path().display(),
        language = %preferences.language,
        theme = %preferences.theme,
        "session opened"
    );

    Ok(Session { store, preferences })
}

fn handle_config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default()?;
            config.set_value(&key, &value)?;
            config.ensure_bootstrap_files()?;
            config.save()?;

            println!("Config saved: {key} = {value}");
            Ok(())
        }
        ConfigCommands::Get { key } => {
            let config = Config::load_or_default()?;
            let value = config
                .get_value(&key)
                .with_context(|| format!("Unsupported config key: {key}"))?;

            println!("{value}");
            Ok(())
        }
    }
}

fn handle_add(session: &Session, hours: Option<String>, date: Option<String>) -> Result<()> {
    let labels = session.preferences.labels();
    let palette = session.preferences.palette();

    let EntryInput { date, hours } = match hours {
        Some(hours) => EntryInput {
            date: prompts::date_or_today(date),
            hours,
        },
        None => prompts::prompt_entry(labels, date)?,
    };

    match session.store.add_entry(&hours, Some(date.as_str())) {
        Ok(true) => {
            println!("{}", labels.success);
        }
        Ok(false) => {
            bail!("{} {date}", labels.dup_entry);
        }
        Err(error) => {
            if let Some(invalid) = error.validation() {
                let message = match invalid {
                    ValidationError::Date { input } => format!("{}: {input}", labels.error_date),
                    ValidationError::Hours { input } => format!("{}: {input}", labels.error_hours),
                };
                bail!(message);
            }
            return Err(error).context("Failed to add study entry");
        }
    }

    let total = session.store.week_total(None)?;
    println!("{} {}", heading(labels.total, palette), format_hours(total));
    Ok(())
}

fn handle_total(session: &Session, week: Option<u32>) -> Result<()> {
    let labels = session.preferences.labels();
    let palette = session.preferences.palette();
    let total = session.store.week_total(week)?;

    let label = match week {
        Some(week) => format!("{} {week}:", labels.week),
        None => labels.total.to_string(),
    };
    println!("{} {}", heading(&label, palette), format_hours(total));

    Ok(())
}

fn handle_history(session: &Session) -> Result<()> {
    let labels = session.preferences.labels();
    let rows = session.store.history()?;

    println!("{}", heading(labels.history_title, session.preferences.palette()));
    println!("{}", history_table(&rows, labels));

    Ok(())
}

fn handle_reset(session: &Session, skip_confirmation: bool) -> Result<()> {
    let labels = session.preferences.labels();
    let palette = session.preferences.palette();

    if !skip_confirmation && !prompts::confirm_reset(labels, palette)? {
        println!("{}", labels.reset_cancelled);
        return Ok(());
    }

    session.store.reset_all()?;
    println!("{}", warning(labels.reset_success, palette));

    Ok(())
}

fn handle_settings(mut session: Session, command: SettingsCommands) -> Result<()> {
    match command {
        SettingsCommands::Show => {}
        SettingsCommands::Language { code } => {
            let language = code.parse::<Language>()?;
            session.preferences.set_language(&session.store, language)?;
        }
        SettingsCommands::Theme { code } => {
            let theme = code.parse::<Theme>()?;
            session.preferences.set_theme(&session.store, theme)?;
        }
    }

    print_settings(&session.preferences);
    Ok(())
}

fn print_settings(preferences: &Preferences) {
    let labels = preferences.labels();
    let palette = preferences.palette();

    let languages = Language::ALL
        .iter()
        .map(|language| format!("{} ({})", labels.language_name(*language), language.code()))
        .collect::<Vec<_>>()
        .join(", ");
    let themes = Theme::ALL
        .iter()
        .map(|theme| format!("{} ({})", theme.label(labels), theme.code()))
        .collect::<Vec<_>>()
        .join(", ");

    println!("{}", heading(&format!("{} - {}", labels.title, labels.settings), palette));
    println!(
        "- {}: {} [{languages}]",
        labels.language,
        labels.language_name(preferences.language)
    );
    println!(
        "- {}: {} [{themes}]",
        labels.theme,
        preferences.theme.label(labels)
    );
    println!("{}", palette_preview(palette));
}
