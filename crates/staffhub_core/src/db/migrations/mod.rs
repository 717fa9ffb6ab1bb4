//! Schema steps for the client database.
//!
//! Each step is an embedded SQL file. Pending steps run in one transaction and
//! `PRAGMA user_version` records the last applied step.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "client_storage",
        sql: include_str!("0001_client_storage.sql"),
    },
    Migration {
        version: 2,
        name: "accounts",
        sql: include_str!("0002_accounts.sql"),
    },
];

/// Latest schema version this build can create.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Schema version currently recorded in the database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this build.
/// - `MigrationFailed` naming the first step that failed; nothing is applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let pending = pending_after(from);
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        let sql = format!("{}\nPRAGMA user_version = {};", step.sql, step.version);
        tx.execute_batch(&sql)
            .map_err(|source| DbError::MigrationFailed {
                version: step.version,
                name: step.name,
                source,
            })?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from, latest
    );
    Ok(())
}

fn pending_after(version: u32) -> &'static [Migration] {
    let start = MIGRATIONS.partition_point(|migration| migration.version <= version);
    &MIGRATIONS[start..]
}

#[cfg(test)]
mod tests {
    use super::{latest_version, pending_after, MIGRATIONS};

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, index + 1, "{}", migration.name);
        }
        assert_eq!(latest_version(), 2);
    }

    #[test]
    fn pending_steps_follow_current_version() {
        assert_eq!(pending_after(0).len(), MIGRATIONS.len());
        assert_eq!(pending_after(1)[0].name, "accounts");
        assert!(pending_after(latest_version()).is_empty());
    }
}
