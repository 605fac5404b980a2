//! Book data-access operations.
//!
//! # Responsibility
//! - List/find books joined with their author and map them to responses.
//! - Create/update/delete book rows after validating input and resolving
//!   the referenced author.
//!
//! # Invariants
//! - Reads preserve store row order and are all-or-nothing.
//! - Zero matched/affected rows surface as `NotFound`, never as success.
//! - Positional parameters follow `BookDto` field-declaration order.

use super::author_service::find_author;
use super::{ServiceError, ServiceResult};
use crate::db::{DbError, Queryable, StoreRow};
use crate::mapper::{map_to_book_entity, map_to_book_response, map_to_book_simple};
use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId};
use crate::model::dto::{BookDto, BookResponse};
use crate::model::simple::BookSimple;
use log::{debug, info, warn};
use rusqlite::types::Value;

const BOOK_SELECT_SQL: &str = "SELECT b.id, b.title, b.release_year, b.summary, b.price, b.cover,
    a.id, a.firstname, a.lastname, a.birthday
FROM book b
LEFT JOIN author a ON b.author_id = a.id";

const BOOK_INSERT_SQL: &str = "INSERT INTO book (title, release_year, summary, price, author_id) VALUES ($1, $2, $3, $4, $5) RETURNING id";

const BOOK_UPDATE_SQL: &str = "UPDATE book SET title = $1, release_year = $2, summary = $3, price = $4, author_id = $5 WHERE id = $6";

const BOOK_DELETE_SQL: &str = "DELETE FROM book WHERE id = $1";

const AUTHOR_ID_COLUMN: usize = 6;

/// Lists every book with its author, in store row order.
///
/// # Errors
/// - `Query` when the statement or any row decode fails; rows decoded
///   before the failure are discarded.
pub fn list(handle: &impl Queryable) -> ServiceResult<Vec<BookResponse>> {
    let rows = handle.query(BOOK_SELECT_SQL, &[])?;
    let books = rows
        .iter()
        .map(|row| parse_book_row(row).map(|book| map_to_book_response(&book)))
        .collect::<ServiceResult<Vec<_>>>()?;

    debug!(
        "event=book_list module=service status=ok count={}",
        books.len()
    );
    Ok(books)
}

/// Lists every book as a flat projection without author fields.
///
/// Runs the same join as [`list`], so rows without an author still fail.
pub fn list_simple(handle: &impl Queryable) -> ServiceResult<Vec<BookSimple>> {
    let rows = handle.query(BOOK_SELECT_SQL, &[])?;
    let books = rows
        .iter()
        .map(|row| parse_book_row(row).map(|book| map_to_book_simple(&book)))
        .collect::<ServiceResult<Vec<_>>>()?;

    debug!(
        "event=book_list module=service status=ok mode=simple count={}",
        books.len()
    );
    Ok(books)
}

/// Finds one book by primary key.
///
/// # Errors
/// - `NotFound` when no row matches `id`.
/// - `Query` on store or decode failure.
pub fn find(id: BookId, handle: &impl Queryable) -> ServiceResult<BookResponse> {
    let sql = format!("{BOOK_SELECT_SQL}\nWHERE b.id = $1");
    let row = handle
        .query_row(&sql, &[Value::Integer(id)])?
        .ok_or(ServiceError::NotFound { entity: "book", id })?;

    let book = parse_book_row(&row)?;
    debug!("event=book_find module=service status=ok book_id={id}");
    Ok(map_to_book_response(&book))
}

/// Inserts a book for an existing author and returns the generated key.
///
/// # Errors
/// - `Validation` for out-of-range fields; no statement is issued.
/// - `AuthorNotFound` when `dto.author_id` does not resolve; no insert is
///   issued.
/// - `Query` on write failure.
pub fn create(dto: &BookDto, handle: &impl Queryable) -> ServiceResult<BookId> {
    let author = resolve_author(dto, handle)?;
    let book = map_to_book_entity(dto, author);

    let row = handle
        .query_row(BOOK_INSERT_SQL, &write_params(&book))?
        .ok_or(ServiceError::InconsistentState("book insert returned no id"))?;

    let id = row.get_i64(0)?;
    info!(
        "event=book_create module=service status=ok book_id={id} author_id={}",
        book.author.id
    );
    Ok(id)
}

/// Replaces the writable fields of an existing book.
///
/// The stored cover is left untouched.
///
/// # Errors
/// - `Validation` / `AuthorNotFound` as for [`create`]; no update is issued.
/// - `NotFound` when no row has key `id`.
pub fn update(id: BookId, dto: &BookDto, handle: &impl Queryable) -> ServiceResult<()> {
    let author = resolve_author(dto, handle)?;
    let book = map_to_book_entity(dto, author);

    let mut params = write_params(&book);
    params.push(Value::Integer(id));
    let changed = handle.exec(BOOK_UPDATE_SQL, &params)?;

    if changed == 0 {
        return Err(ServiceError::NotFound { entity: "book", id });
    }

    info!("event=book_update module=service status=ok book_id={id}");
    Ok(())
}

/// Deletes a book by primary key.
///
/// # Errors
/// - `NotFound` when no row has key `id`.
pub fn delete(id: BookId, handle: &impl Queryable) -> ServiceResult<()> {
    let changed = handle.exec(BOOK_DELETE_SQL, &[Value::Integer(id)])?;

    if changed == 0 {
        return Err(ServiceError::NotFound { entity: "book", id });
    }

    info!("event=book_delete module=service status=ok book_id={id}");
    Ok(())
}

fn resolve_author(dto: &BookDto, handle: &impl Queryable) -> ServiceResult<Author> {
    dto.validate()?;

    match find_author(dto.author_id, handle) {
        Ok(author) => Ok(author),
        Err(ServiceError::NotFound { .. }) => {
            warn!(
                "event=book_write module=service status=rejected error_code=author_not_found author_id={}",
                dto.author_id
            );
            Err(ServiceError::AuthorNotFound(dto.author_id))
        }
        Err(other) => Err(other),
    }
}

fn write_params(book: &Book) -> Vec<Value> {
    vec![
        Value::Text(book.title.clone()),
        Value::Integer(i64::from(book.release_year)),
        Value::Text(book.summary.clone()),
        Value::Real(book.price),
        Value::Integer(book.author.id),
    ]
}

fn parse_book_row(row: &StoreRow) -> ServiceResult<Book> {
    Ok(Book {
        id: row.get_i64(0)?,
        title: row.get_text(1)?,
        release_year: row.get_i32(2)?,
        summary: row.get_text(3)?,
        price: row.get_f64(4)?,
        cover: row.get_opt_text(5)?,
        author: parse_joined_author(row)?,
    })
}

fn parse_joined_author(row: &StoreRow) -> ServiceResult<Author> {
    // LEFT JOIN yields NULL author columns for an orphaned book row.
    if row.is_null(AUTHOR_ID_COLUMN)? {
        return Err(ServiceError::Query(DbError::Decode {
            column: AUTHOR_ID_COLUMN,
            expected: "author id",
            found: "null",
        }));
    }

    let id: AuthorId = row.get_i64(AUTHOR_ID_COLUMN)?;
    Ok(Author {
        id,
        firstname: row.get_text(AUTHOR_ID_COLUMN + 1)?,
        lastname: row.get_text(AUTHOR_ID_COLUMN + 2)?,
        birthday: row.get_text(AUTHOR_ID_COLUMN + 3)?,
    })
}
