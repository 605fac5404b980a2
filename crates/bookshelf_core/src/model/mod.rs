//! Catalog data shapes.
//!
//! # Responsibility
//! - `author` / `book`: persisted entities matching the store schema.
//! - `dto`: wire-facing request and response shapes.
//! - `simple`: flat read projections for list responses.
//!
//! # Invariants
//! - Entities are rebuilt from rows per request; nothing here is cached.
//! - DTOs are never persisted directly; they pass through `mapper`.

pub mod author;
pub mod book;
pub mod dto;
pub mod simple;
