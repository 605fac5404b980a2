//! Flat read projections used by list and detail responses.

use super::author::AuthorId;
use super::book::BookId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSimple {
    pub id: AuthorId,
    pub firstname: String,
    pub lastname: String,
    pub birthday: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSimple {
    pub id: BookId,
    pub title: String,
    pub release_year: i32,
    pub summary: String,
    pub price: f64,
}
