//! Local SQLite database for client storage and seeded accounts.
//!
//! # Responsibility
//! - Expose `open_db`/`open_db_in_memory` as the only way to get a connection.
//! - Report schema problems with the migration that caused them.
//!
//! # Invariants
//! - Returned connections are at `migrations::latest_version()`.
//! - Sessions and accounts are never read before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Database open and schema errors.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// A registered migration failed; the transaction was rolled back.
    MigrationFailed {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::MigrationFailed {
                version,
                name,
                source,
            } => write!(f, "migration {version} ({name}) failed: {source}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "client database is at schema {db_version}, this build supports up to \
                 {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MigrationFailed { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn migration_failure_names_the_step() {
        let err = DbError::MigrationFailed {
            version: 2,
            name: "accounts",
            source: rusqlite::Error::InvalidQuery,
        };
        let message = err.to_string();
        assert!(message.starts_with("migration 2 (accounts) failed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn unsupported_schema_has_no_source() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 2,
        };
        assert!(err.to_string().contains("schema 9"));
        assert!(err.source().is_none());
    }
}
