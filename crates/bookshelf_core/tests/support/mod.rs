//! Recording store handle for service tests.
//!
//! Expectations are consumed in order; any statement that does not match
//! the next expectation (SQL compared whitespace-insensitively, arguments
//! compared exactly) fails the test.

#![allow(dead_code)]

use bookshelf_core::{DbError, DbResult, Queryable, StoreRow};
use rusqlite::ffi;
use rusqlite::types::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Query,
    Exec,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub kind: CallKind,
    pub sql: String,
    pub args: Vec<Value>,
}

enum Outcome {
    Rows(Vec<Vec<Value>>),
    Affected(usize),
    Fail,
}

struct Expectation {
    kind: CallKind,
    sql: String,
    args: Vec<Value>,
    outcome: Outcome,
}

#[derive(Default)]
pub struct MockStore {
    expected: RefCell<VecDeque<Expectation>>,
    calls: RefCell<Vec<Call>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_query(&self, sql: &str, args: Vec<Value>, rows: Vec<Vec<Value>>) {
        self.push(CallKind::Query, sql, args, Outcome::Rows(rows));
    }

    pub fn expect_query_error(&self, sql: &str, args: Vec<Value>) {
        self.push(CallKind::Query, sql, args, Outcome::Fail);
    }

    pub fn expect_exec(&self, sql: &str, args: Vec<Value>, affected: usize) {
        self.push(CallKind::Exec, sql, args, Outcome::Affected(affected));
    }

    pub fn expect_exec_error(&self, sql: &str, args: Vec<Value>) {
        self.push(CallKind::Exec, sql, args, Outcome::Fail);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn statements_starting_with(&self, keyword: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.sql.starts_with(keyword))
            .count()
    }

    /// Fails when some expectation was never consumed.
    pub fn assert_done(&self) {
        let remaining = self.expected.borrow();
        assert!(
            remaining.is_empty(),
            "{} expected statement(s) were not issued, next: `{}`",
            remaining.len(),
            remaining.front().map(|e| e.sql.as_str()).unwrap_or_default()
        );
    }

    fn push(&self, kind: CallKind, sql: &str, args: Vec<Value>, outcome: Outcome) {
        self.expected.borrow_mut().push_back(Expectation {
            kind,
            sql: normalize_sql(sql),
            args,
            outcome,
        });
    }

    fn next(&self, kind: CallKind, sql: &str, args: &[Value]) -> Outcome {
        let sql = normalize_sql(sql);
        self.calls.borrow_mut().push(Call {
            kind,
            sql: sql.clone(),
            args: args.to_vec(),
        });

        let expectation = self
            .expected
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {kind:?} statement: `{sql}`"));

        assert_eq!(expectation.kind, kind, "statement kind mismatch for `{sql}`");
        assert_eq!(expectation.sql, sql, "statement text mismatch");
        assert_eq!(expectation.args, args, "arguments mismatch for `{sql}`");
        expectation.outcome
    }
}

impl Queryable for MockStore {
    fn query(&self, sql: &str, params: &[Value]) -> DbResult<Vec<StoreRow>> {
        match self.next(CallKind::Query, sql, params) {
            Outcome::Rows(rows) => Ok(rows.into_iter().map(StoreRow::new).collect()),
            Outcome::Fail => Err(mock_failure()),
            Outcome::Affected(_) => unreachable!("query expectations never carry row counts"),
        }
    }

    fn exec(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        match self.next(CallKind::Exec, sql, params) {
            Outcome::Affected(count) => Ok(count),
            Outcome::Fail => Err(mock_failure()),
            Outcome::Rows(_) => unreachable!("exec expectations never carry rows"),
        }
    }
}

pub fn normalize_sql(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn mock_failure() -> DbError {
    DbError::Sqlite(rusqlite::Error::SqliteFailure(
        ffi::Error::new(ffi::SQLITE_IOERR),
        Some("mock store failure".to_string()),
    ))
}

pub fn int(value: i64) -> Value {
    Value::Integer(value)
}

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub fn real(value: f64) -> Value {
    Value::Real(value)
}

pub fn book_row(
    id: i64,
    title: &str,
    release_year: i64,
    summary: &str,
    price: f64,
    cover: Option<&str>,
    author: (i64, &str, &str, &str),
) -> Vec<Value> {
    vec![
        int(id),
        text(title),
        int(release_year),
        text(summary),
        real(price),
        cover.map_or(Value::Null, text),
        int(author.0),
        text(author.1),
        text(author.2),
        text(author.3),
    ]
}

pub fn author_row(id: i64, firstname: &str, lastname: &str, birthday: &str) -> Vec<Value> {
    vec![int(id), text(firstname), text(lastname), text(birthday)]
}
