//! Author lookup and creation.
//!
//! Book writes depend on `find_author` to resolve `author_id` before any
//! statement touches the `book` table.

use super::{ServiceError, ServiceResult};
use crate::db::{Queryable, StoreRow};
use crate::mapper::map_to_author_simple;
use crate::model::author::{Author, AuthorId};
use crate::model::dto::NewAuthor;
use crate::model::simple::AuthorSimple;
use log::{debug, info};
use rusqlite::types::Value;

const AUTHOR_FIND_SQL: &str = "SELECT id, firstname, lastname, birthday FROM author WHERE id = $1";

const AUTHOR_LIST_SQL: &str = "SELECT id, firstname, lastname, birthday FROM author ORDER BY id";

const AUTHOR_INSERT_SQL: &str =
    "INSERT INTO author (firstname, lastname, birthday) VALUES ($1, $2, $3) RETURNING id";

/// Resolves one author by primary key.
///
/// # Errors
/// - `NotFound` when no row matches.
/// - `Query` on store or decode failure.
pub fn find_author(id: AuthorId, handle: &impl Queryable) -> ServiceResult<Author> {
    let row = handle
        .query_row(AUTHOR_FIND_SQL, &[Value::Integer(id)])?
        .ok_or(ServiceError::NotFound {
            entity: "author",
            id,
        })?;

    let author = parse_author_row(&row)?;
    debug!("event=author_find module=service status=ok author_id={id}");
    Ok(author)
}

/// Lists every author in key order.
pub fn list_authors(handle: &impl Queryable) -> ServiceResult<Vec<AuthorSimple>> {
    let rows = handle.query(AUTHOR_LIST_SQL, &[])?;
    let authors = rows
        .iter()
        .map(|row| parse_author_row(row).map(|author| map_to_author_simple(&author)))
        .collect::<ServiceResult<Vec<_>>>()?;

    debug!(
        "event=author_list module=service status=ok count={}",
        authors.len()
    );
    Ok(authors)
}

/// Inserts a new author and returns the generated key.
pub fn create_author(input: &NewAuthor, handle: &impl Queryable) -> ServiceResult<AuthorId> {
    input.validate()?;

    let row = handle
        .query_row(
            AUTHOR_INSERT_SQL,
            &[
                Value::Text(input.firstname.clone()),
                Value::Text(input.lastname.clone()),
                Value::Text(input.birthday.clone()),
            ],
        )?
        .ok_or(ServiceError::InconsistentState(
            "author insert returned no id",
        ))?;

    let id = row.get_i64(0)?;
    info!("event=author_create module=service status=ok author_id={id}");
    Ok(id)
}

fn parse_author_row(row: &StoreRow) -> ServiceResult<Author> {
    Ok(Author {
        id: row.get_i64(0)?,
        firstname: row.get_text(1)?,
        lastname: row.get_text(2)?,
        birthday: row.get_text(3)?,
    })
}
