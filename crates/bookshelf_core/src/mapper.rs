//! Pure conversions between persisted entities and wire DTOs.
//!
//! # Invariants
//! - Every function here is total and side-effect free; inputs are assumed
//!   validated upstream.
//! - An absent cover stays absent; it is never replaced by a placeholder.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::dto::{BookDto, BookResponse};
use crate::model::simple::{AuthorSimple, BookSimple};

/// Builds the response shape for one joined book row.
pub fn map_to_book_response(book: &Book) -> BookResponse {
    BookResponse {
        id: book.id,
        title: book.title.clone(),
        release_year: book.release_year,
        summary: book.summary.clone(),
        price: book.price,
        cover: book.cover.clone(),
        author: map_to_author_simple(&book.author),
    }
}

/// Builds an unsaved entity from request input and its resolved author.
///
/// The returned book has `id == 0` and no cover; callers that update an
/// existing row pass the key alongside instead of through the entity.
pub fn map_to_book_entity(dto: &BookDto, author: Author) -> Book {
    Book {
        id: 0,
        title: dto.title.clone(),
        release_year: dto.release_year,
        summary: dto.summary.clone(),
        price: dto.price,
        cover: None,
        author,
    }
}

pub fn map_to_author_simple(author: &Author) -> AuthorSimple {
    AuthorSimple {
        id: author.id,
        firstname: author.firstname.clone(),
        lastname: author.lastname.clone(),
        birthday: author.birthday.clone(),
    }
}

pub fn map_to_book_simple(book: &Book) -> BookSimple {
    BookSimple {
        id: book.id,
        title: book.title.clone(),
        release_year: book.release_year,
        summary: book.summary.clone(),
        price: book.price,
    }
}
