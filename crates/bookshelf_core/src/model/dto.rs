//! Wire-facing request and response shapes.
//!
//! # Responsibility
//! - `BookDto`: create/update input referencing an author by ID.
//! - `NewAuthor`: author creation input.
//! - `BookResponse`: detail/list output with the author nested.
//!
//! # Invariants
//! - `validate()` must pass before any statement is issued for a request.
//! - `BookResponse.cover` serializes as `null` when absent, never omitted.

use super::author::AuthorId;
use super::book::BookId;
use super::simple::AuthorSimple;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid iso date regex")
});

const MAX_RELEASE_YEAR: i32 = 9999;

/// Create/update input for a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub title: String,
    pub release_year: i32,
    pub summary: String,
    pub price: f64,
    pub author_id: AuthorId,
}

/// Field-level input failures detected before any statement is issued.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyTitle,
    ReleaseYearOutOfRange(i32),
    InvalidPrice(f64),
    InvalidAuthorId(AuthorId),
    EmptyName(&'static str),
    InvalidBirthday(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title must not be empty"),
            Self::ReleaseYearOutOfRange(year) => write!(
                f,
                "release year {year} is outside 0..={MAX_RELEASE_YEAR}"
            ),
            Self::InvalidPrice(price) => {
                write!(f, "price must be a finite non-negative number, got {price}")
            }
            Self::InvalidAuthorId(id) => write!(f, "author id must be positive, got {id}"),
            Self::EmptyName(field) => write!(f, "author {field} must not be empty"),
            Self::InvalidBirthday(value) => {
                write!(f, "birthday `{value}` is not a calendar date (YYYY-MM-DD)")
            }
        }
    }
}

impl Error for ValidationError {}

impl BookDto {
    /// Checks field ranges before the request touches the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if !(0..=MAX_RELEASE_YEAR).contains(&self.release_year) {
            return Err(ValidationError::ReleaseYearOutOfRange(
                self.release_year,
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice(self.price));
        }
        if self.author_id < 1 {
            return Err(ValidationError::InvalidAuthorId(self.author_id));
        }
        Ok(())
    }
}

/// Creation input for an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub firstname: String,
    pub lastname: String,
    pub birthday: String,
}

impl NewAuthor {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.firstname.trim().is_empty() {
            return Err(ValidationError::EmptyName("firstname"));
        }
        if self.lastname.trim().is_empty() {
            return Err(ValidationError::EmptyName("lastname"));
        }
        if !is_iso_date(&self.birthday) {
            return Err(ValidationError::InvalidBirthday(
                self.birthday.clone(),
            ));
        }
        Ok(())
    }
}

/// Book detail as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: BookId,
    pub title: String,
    pub release_year: i32,
    pub summary: String,
    pub price: f64,
    pub cover: Option<String>,
    pub author: AuthorSimple,
}

/// Accepts `YYYY-MM-DD` only when the day exists in that month of the
/// proleptic Gregorian calendar.
fn is_iso_date(value: &str) -> bool {
    let Some(captures) = ISO_DATE_RE.captures(value) else {
        return false;
    };
    let (Ok(year), Ok(month), Ok(day)) = (
        captures[1].parse::<u32>(),
        captures[2].parse::<u32>(),
        captures[3].parse::<u32>(),
    ) else {
        return false;
    };
    day >= 1 && day <= days_in_month(year, month)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
