pub const CREATE_STUDY: &str = r#"
CREATE TABLE IF NOT EXISTS study (
  date  TEXT PRIMARY KEY,
  hours REAL NOT NULL,
  week  INTEGER NOT NULL
);
"#;

pub const CREATE_SETTINGS: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
  key   TEXT PRIMARY KEY,
  value TEXT
);
"#;

pub const INDEX_STUDY_WEEK: &str = "CREATE INDEX IF NOT EXISTS idx_study_week ON study(week);";

pub const INSERT_ENTRY: &str = "INSERT INTO study (date, hours, week) VALUES (?1, ?2, ?3)";

pub const SUM_WEEK: &str = "SELECT SUM(hours) FROM study WHERE week = ?1";

// Year comes from the calendar date, not the ISO week-year.
pub const HISTORY: &str = r#"
SELECT week,
       CAST(strftime('%Y', date) AS INTEGER) AS year,
       SUM(hours)
FROM study
GROUP BY year, week
ORDER BY year DESC, week DESC
"#;

pub const SELECT_SETTING: &str = "SELECT value FROM settings WHERE key = ?1";

pub const UPSERT_SETTING: &str = "INSERT INTO settings (key, value) VALUES (?1, ?2)
 ON CONFLICT(key) DO UPDATE SET value=excluded.value";

pub const DELETE_ALL_ENTRIES: &str = "DELETE FROM study";

pub fn schema_statements() -> Vec<&'static str> {
    vec![CREATE_STUDY, CREATE_SETTINGS, INDEX_STUDY_WEEK]
}
