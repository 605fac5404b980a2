//! Book entity.
//!
//! # Invariants
//! - Every persisted book carries exactly one embedded `Author`.
//! - `cover` is `None` when no cover image was recorded (SQL `NULL`).
//! - `id == 0` marks an entity that has not been inserted yet.

use super::author::Author;
use serde::{Deserialize, Serialize};

/// Primary key of a `book` row.
pub type BookId = i64;

/// Persisted book record joined with its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub release_year: i32,
    pub summary: String,
    pub price: f64,
    pub cover: Option<String>,
    pub author: Author,
}

impl Book {
    /// Returns whether the entity has been assigned a store key.
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}
