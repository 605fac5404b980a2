//! SQLite storage bootstrap, schema migrations and the store handle seam.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the catalog.
//! - Apply schema migrations in deterministic order.
//! - Define the minimal `Queryable` capability consumed by services.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Services only see the store through `Queryable`; they never open
//!   connections themselves.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
pub mod store;

pub use open::{open_db, open_db_in_memory};
pub use store::{Queryable, StoreRow};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A result column could not be decoded into the requested field type.
    Decode {
        column: usize,
        expected: &'static str,
        found: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Decode {
                column,
                expected,
                found,
            } => write!(
                f,
                "cannot decode column {column}: expected {expected}, found {found}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Decode { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
