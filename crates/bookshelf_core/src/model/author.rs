//! Author entity.

use serde::{Deserialize, Serialize};

/// Primary key of an `author` row.
pub type AuthorId = i64;

/// Persisted author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub firstname: String,
    pub lastname: String,
    /// ISO date text (`YYYY-MM-DD`), stored as-is.
    pub birthday: String,
}
