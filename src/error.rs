use std::path::PathBuf;
use thiserror::Error;

/// Input rejected before anything touches the database.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date format: {input}. Example: 2024-01-10")]
    Date { input: String },

    #[error("Invalid hours value: {input}")]
    Hours { input: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to open SQLite DB: {}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to create DB directory: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error")]
    Storage(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(error) => Some(error),
            Self::StorageUnavailable { .. } | Self::Io { .. } | Self::Storage(_) => None,
        }
    }
}

/// PRIMARY KEY or UNIQUE conflict only; NOT NULL and CHECK failures are real errors.
pub fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(error, rusqlite::Error::SqliteFailure(err, _)
        if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
}

#[cfg(test)]
mod tests {
    use super::{StoreError, is_unique_violation};
    use rusqlite::Connection;
    use std::error::Error;

    fn scratch() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        conn.execute_batch(
            "CREATE TABLE t (id TEXT PRIMARY KEY, code TEXT UNIQUE, n INTEGER NOT NULL CHECK (n >= 0));
             INSERT INTO t VALUES ('a', 'x', 1);",
        )
        .expect("schema");
        conn
    }

    #[test]
    fn key_conflicts_are_unique_violations() {
        let conn = scratch();

        let duplicate_key = conn
            .execute("INSERT INTO t VALUES ('a', 'y', 1)", [])
            .unwrap_err();
        let duplicate_code = conn
            .execute("INSERT INTO t VALUES ('b', 'x', 1)", [])
            .unwrap_err();

        assert!(is_unique_violation(&duplicate_key));
        assert!(is_unique_violation(&duplicate_code));
    }

    #[test]
    fn not_null_and_check_failures_are_not_unique_violations() {
        let conn = scratch();

        let missing = conn
            .execute("INSERT INTO t VALUES ('c', 'z', NULL)", [])
            .unwrap_err();
        let negative = conn
            .execute("INSERT INTO t VALUES ('d', 'w', -1)", [])
            .unwrap_err();

        assert!(!is_unique_violation(&missing));
        assert!(!is_unique_violation(&negative));
    }

    #[test]
    fn storage_message_leaves_detail_to_source() {
        let conn = scratch();
        let error = StoreError::from(
            conn.execute("INSERT INTO t VALUES ('a', 'y', 1)", [])
                .unwrap_err(),
        );

        assert_eq!(error.to_string(), "Database error");
        assert!(error.source().is_some());
    }
}
