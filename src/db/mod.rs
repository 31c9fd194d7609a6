pub mod queries;

use crate::error::{StoreError, ValidationError, is_unique_violation};
use chrono::{Datelike, Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One line of the history view: total hours for a (calendar year, ISO week) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub week: u32,
    pub year: i32,
    pub total_hours: f64,
}

/// Study hours and key/value settings persisted in a single SQLite file.
///
/// Only the path is kept between calls; every operation opens its own
/// connection and drops it before returning.
#[derive(Debug, Clone)]
pub struct StudyRecordStore {
    path: PathBuf,
}

impl StudyRecordStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let store = Self {
            path: path.to_path_buf(),
        };
        store.init_schema()?;

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        queries::schema_statements()
            .iter()
            .try_for_each(|statement| conn.execute(statement, []).map(|_| ()))?;

        Ok(())
    }

    /// Records `hours_input` for `date_input` (today when absent).
    ///
    /// Returns `Ok(false)` when the date already has an entry; the stored
    /// hours are left as they were.
    pub fn add_entry(
        &self,
        hours_input: &str,
        date_input: Option<&str>,
    ) -> Result<bool, StoreError> {
        let date = date_input.map(parse_date).transpose()?.unwrap_or_else(today);
        let hours = parse_hours(hours_input)?;

        self.insert_entry(date, hours)
    }

    pub fn insert_entry(&self, date: NaiveDate, hours: f64) -> Result<bool, StoreError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(ValidationError::Hours {
                input: hours.to_string(),
            }
            .into());
        }

        let date_str = date.format(DATE_FORMAT).to_string();
        let week = week_of(date);
        let conn = self.connect()?;

        match conn.execute(queries::INSERT_ENTRY, params![&date_str, hours, week]) {
            Ok(_) => {
                debug!(date = %date_str, hours, week, "study entry inserted");
                Ok(true)
            }
            Err(error) if is_unique_violation(&error) => {
                debug!(date = %date_str, "study entry already exists for date");
                Ok(false)
            }
            Err(error) => Err(error.into()),
        }
    }

    pub fn week_total(&self, week: Option<u32>) -> Result<f64, StoreError> {
        let week = week.unwrap_or_else(|| week_of(today()));
        let conn = self.connect()?;
        let total: Option<f64> = conn.query_row(queries::SUM_WEEK, params![week], |row| row.get(0))?;

        Ok(total.unwrap_or(0.0))
    }

    pub fn history(&self) -> Result<Vec<HistoryRow>, StoreError> {
        let conn = self.connect()?;
        let mut statement = conn.prepare(queries::HISTORY)?;

        let rows = statement
            .query_map([], |row| {
                Ok(HistoryRow {
                    week: row.get(0)?,
                    year: row.get(1)?,
                    total_hours: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn get_setting(&self, key: &str, default: Option<&str>) -> Result<Option<String>, StoreError> {
        let conn = self.connect()?;
        let value: Option<Option<String>> = conn
            .query_row(queries::SELECT_SETTING, params![key], |row| row.get(0))
            .optional()?;

        Ok(value
            .flatten()
            .or_else(|| default.map(ToOwned::to_owned)))
    }

    pub fn save_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute(queries::UPSERT_SETTING, params![key, value])?;
        debug!(key, "setting saved");

        Ok(())
    }

    /// Deletes every study entry. Settings are kept.
    pub fn reset_all(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let deleted = conn.execute(queries::DELETE_ALL_ENTRIES, [])?;
        info!(deleted, "all study entries deleted");

        Ok(())
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.path).map_err(|source| StoreError::StorageUnavailable {
            path: self.path.clone(),
            source,
        })
    }
}

/// Accepts exactly `YYYY-MM-DD`: no sign, no padding, four-digit year.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::Date {
        input: input.to_string(),
    };

    let well_formed = input.len() == 10
        && input.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

pub fn parse_hours(input: &str) -> Result<f64, ValidationError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite() && *hours >= 0.0)
        .ok_or_else(|| ValidationError::Hours {
            input: input.to_string(),
        })
}

/// ISO-8601 week number (Monday start, week 1 holds the first Thursday).
pub fn week_of(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
