use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    author_service, book_service, AuthorId, BookDto, DbError, NewAuthor, ServiceError,
};
use rusqlite::{params, Connection};

fn seed_author(conn: &Connection, firstname: &str, lastname: &str, birthday: &str) -> AuthorId {
    author_service::create_author(
        &NewAuthor {
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            birthday: birthday.to_string(),
        },
        conn,
    )
    .unwrap()
}

fn dto(title: &str, author_id: AuthorId) -> BookDto {
    BookDto {
        title: title.to_string(),
        release_year: 1876,
        summary: "An adventure book".to_string(),
        price: 12.2,
        author_id,
    }
}

#[test]
fn create_then_find_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let twain = seed_author(&conn, "Mark", "Twain", "1835-11-30");

    let id = book_service::create(&dto("Tom Sawyer", twain), &conn).unwrap();
    let found = book_service::find(id, &conn).unwrap();

    assert_eq!(found.id, id);
    assert_eq!(found.title, "Tom Sawyer");
    assert_eq!(found.release_year, 1876);
    assert_eq!(found.price, 12.2);
    assert_eq!(found.cover, None);
    assert_eq!(found.author.id, twain);
    assert_eq!(found.author.lastname, "Twain");
}

#[test]
fn generated_ids_increase() {
    let conn = open_db_in_memory().unwrap();
    let twain = seed_author(&conn, "Mark", "Twain", "1835-11-30");

    let first = book_service::create(&dto("Tom Sawyer", twain), &conn).unwrap();
    let second = book_service::create(&dto("Huckleberry Finn", twain), &conn).unwrap();

    assert_eq!(first, 1);
    assert!(second > first);
}

#[test]
fn list_joins_each_book_with_its_author() {
    let conn = open_db_in_memory().unwrap();
    let twain = seed_author(&conn, "Mark", "Twain", "1835-11-30");
    let perrault = seed_author(&conn, "Charles", "Perrault", "1628-01-12");
    book_service::create(&dto("Tom Sawyer", twain), &conn).unwrap();
    book_service::create(&dto("The Red Hat", perrault), &conn).unwrap();

    let books = book_service::list(&conn).unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Tom Sawyer");
    assert_eq!(books[0].author.firstname, "Mark");
    assert_eq!(books[1].author.firstname, "Charles");
}

#[test]
fn stored_cover_is_returned() {
    let conn = open_db_in_memory().unwrap();
    let twain = seed_author(&conn, "Mark", "Twain", "1835-11-30");
    let id = book_service::create(&dto("Tom Sawyer", twain), &conn).unwrap();
    conn.execute(
        "UPDATE book SET cover = ?1 WHERE id = ?2;",
        params!["cover1.jpg", id],
    )
    .unwrap();

    let found = book_service::find(id, &conn).unwrap();
    assert_eq!(found.cover.as_deref(), Some("cover1.jpg"));
}

#[test]
fn update_replaces_fields_and_keeps_cover() {
    let conn = open_db_in_memory().unwrap();
    let twain = seed_author(&conn, "Mark", "Twain", "1835-11-30");
    let perrault = seed_author(&conn, "Charles", "Perrault", "1628-01-12");
    let id = book_service::create(&dto("Tom Sawyer", twain), &conn).unwrap();
    conn.execute(
        "UPDATE book SET cover = 'cover1.jpg' WHERE id = ?1;",
        [id],
    )
    .unwrap();

    let changed = BookDto {
        title: "The Red Hat".to_string(),
        release_year: 1697,
        summary: "A fairy tale book".to_string(),
        price: 14.2,
        author_id: perrault,
    };
    book_service::update(id, &changed, &conn).unwrap();

    let found = book_service::find(id, &conn).unwrap();
    assert_eq!(found.title, "The Red Hat");
    assert_eq!(found.release_year, 1697);
    assert_eq!(found.author.id, perrault);
    assert_eq!(found.cover.as_deref(), Some("cover1.jpg"));
}

#[test]
fn update_missing_book_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let twain = seed_author(&conn, "Mark", "Twain", "1835-11-30");

    let err = book_service::update(99, &dto("Tom Sawyer", twain), &conn).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { id: 99, .. }));
}

#[test]
fn writes_with_unknown_author_leave_store_untouched() {
    let conn = open_db_in_memory().unwrap();
    let twain = seed_author(&conn, "Mark", "Twain", "1835-11-30");
    let id = book_service::create(&dto("Tom Sawyer", twain), &conn).unwrap();

    let create_err = book_service::create(&dto("Ghost", 77), &conn).unwrap_err();
    assert!(matches!(create_err, ServiceError::AuthorNotFound(77)));

    let update_err = book_service::update(id, &dto("Ghost", 77), &conn).unwrap_err();
    assert!(matches!(update_err, ServiceError::AuthorNotFound(77)));

    let books = book_service::list(&conn).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Tom Sawyer");
}

#[test]
fn delete_removes_row_once() {
    let conn = open_db_in_memory().unwrap();
    let twain = seed_author(&conn, "Mark", "Twain", "1835-11-30");
    let id = book_service::create(&dto("Tom Sawyer", twain), &conn).unwrap();

    book_service::delete(id, &conn).unwrap();

    assert!(book_service::find(id, &conn).unwrap_err().is_not_found());
    assert!(book_service::delete(id, &conn).unwrap_err().is_not_found());
}

#[test]
fn services_run_inside_a_caller_owned_transaction() {
    let mut conn = open_db_in_memory().unwrap();
    let twain = seed_author(&conn, "Mark", "Twain", "1835-11-30");

    {
        let tx = conn.transaction().unwrap();
        book_service::create(&dto("Tom Sawyer", twain), &*tx).unwrap();
        // Dropped without commit.
    }

    assert!(book_service::list(&conn).unwrap().is_empty());
}

#[test]
fn authors_list_in_key_order() {
    let conn = open_db_in_memory().unwrap();
    seed_author(&conn, "Mark", "Twain", "1835-11-30");
    seed_author(&conn, "Charles", "Perrault", "1628-01-12");

    let authors = author_service::list_authors(&conn).unwrap();
    let names: Vec<_> = authors.iter().map(|a| a.lastname.as_str()).collect();
    assert_eq!(names, ["Twain", "Perrault"]);
}

#[test]
fn orphaned_book_row_is_a_query_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
    conn.execute(
        "INSERT INTO book (title, release_year, summary, price, author_id)
         VALUES ('Orphan', 2000, '', 1.0, 404);",
        [],
    )
    .unwrap();

    let find_err = book_service::find(1, &conn).unwrap_err();
    assert!(matches!(
        find_err,
        ServiceError::Query(DbError::Decode { column: 6, .. })
    ));

    let list_err = book_service::list(&conn).unwrap_err();
    assert!(matches!(list_err, ServiceError::Query(_)));
}
