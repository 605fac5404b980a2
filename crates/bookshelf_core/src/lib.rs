//! Book catalog data-access core.
//!
//! Entities, wire DTOs, the pure mapper between them, and the SQL-backed
//! book and author services. Every service call takes its store handle
//! explicitly; nothing here owns a connection.

pub mod db;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, Queryable, StoreRow};
pub use logging::{default_log_level, init_logging, logging_status};
pub use mapper::{
    map_to_author_simple, map_to_book_entity, map_to_book_response, map_to_book_simple,
};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookId};
pub use model::dto::{BookDto, BookResponse, NewAuthor, ValidationError};
pub use model::simple::{AuthorSimple, BookSimple};
pub use service::{author_service, book_service, ServiceError, ServiceResult};

