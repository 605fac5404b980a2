//! Catalog schema versions.
//!
//! `0001_init.sql` creates `author` and `book`; every book row points at an
//! author through `book.author_id`, which the schema restricts on delete.
//! The applied step is recorded in `PRAGMA user_version`, so a database
//! written by a newer build is refused instead of being read with the
//! wrong column layout.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

// Append only; versions stay strictly increasing.
const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "author_and_book_tables",
    sql: include_str!("0001_init.sql"),
}];

/// Highest catalog schema version this build can read and write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings the catalog schema on `conn` up to [`latest_version`].
///
/// Pending steps run in one transaction; a failing step leaves the
/// catalog at its previous version.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is ahead of this build.
/// - `Sqlite` when a step or the version bump fails.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = stored_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = pending_steps(from_version).collect();
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=skipped version={from_version}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(())
}

fn pending_steps(from_version: u32) -> impl Iterator<Item = &'static SchemaStep> {
    SCHEMA_STEPS
        .iter()
        .filter(move |step| step.version > from_version)
}

fn stored_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
