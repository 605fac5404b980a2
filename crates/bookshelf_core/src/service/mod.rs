//! Catalog use-case services.
//!
//! # Responsibility
//! - Issue parameterized SQL through an explicitly passed `Queryable` handle.
//! - Translate store outcomes into semantic errors (`NotFound`,
//!   `AuthorNotFound`) in addition to transport failures.
//!
//! # Invariants
//! - No service holds a handle beyond a single call.
//! - Write paths that depend on author resolution fail closed: no statement
//!   is issued once resolution fails.

use crate::db::DbError;
use crate::model::author::AuthorId;
use crate::model::dto::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_service;
pub mod book_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error taxonomy shared by book and author services.
#[derive(Debug)]
pub enum ServiceError {
    /// Underlying store failure, including row decode failures.
    Query(DbError),
    /// Zero rows matched or were affected for the given key.
    NotFound { entity: &'static str, id: i64 },
    /// The referenced author does not exist; nothing was written.
    AuthorNotFound(AuthorId),
    /// Malformed input field.
    Validation(ValidationError),
    /// The store acknowledged a write but returned no generated key.
    InconsistentState(&'static str),
}

impl ServiceError {
    /// Returns whether the error means "no such row" for the caller.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(err) => write!(f, "query failed: {err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::AuthorNotFound(id) => write!(f, "referenced author does not exist: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } | Self::AuthorNotFound(_) | Self::InconsistentState(_) => None,
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Query(value)
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
