//! Store handle capability and explicit row decoding.
//!
//! # Responsibility
//! - Describe the three statement shapes services need: row queries,
//!   single-row queries and row-count executions.
//! - Decode result columns by position into named fields, branching on
//!   SQL `NULL` explicitly instead of assuming presence.
//!
//! # Invariants
//! - Parameters are positional and bound to `$1..$n` in slice order.
//! - `query` materializes every row before returning; a failure part way
//!   through discards the rows read so far.

use super::{DbError, DbResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Minimal queryable store handle.
///
/// Implemented for `rusqlite::Connection` (and therefore for transactions,
/// which deref to it). Tests substitute recording handles.
pub trait Queryable {
    /// Runs a row-returning statement and collects every row.
    fn query(&self, sql: &str, params: &[Value]) -> DbResult<Vec<StoreRow>>;

    /// Runs a row-returning statement and keeps only the first row.
    fn query_row(&self, sql: &str, params: &[Value]) -> DbResult<Option<StoreRow>> {
        Ok(self.query(sql, params)?.into_iter().next())
    }

    /// Runs a mutating statement and returns the number of affected rows.
    fn exec(&self, sql: &str, params: &[Value]) -> DbResult<usize>;
}

impl Queryable for Connection {
    fn query(&self, sql: &str, params: &[Value]) -> DbResult<Vec<StoreRow>> {
        let mut stmt = self.prepare(sql)?;
        let column_count = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();

        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for index in 0..column_count {
                values.push(row.get::<_, Value>(index)?);
            }
            out.push(StoreRow::new(values));
        }

        Ok(out)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        Ok(self.execute(sql, params_from_iter(params.iter()))?)
    }
}

/// One materialized result row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRow {
    values: Vec<Value>,
}

impl StoreRow {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` when the column holds SQL `NULL`.
    pub fn is_null(&self, index: usize) -> DbResult<bool> {
        Ok(matches!(self.value(index, "any")?, Value::Null))
    }

    pub fn get_i64(&self, index: usize) -> DbResult<i64> {
        match self.value(index, "integer")? {
            Value::Integer(value) => Ok(*value),
            other => Err(mismatch(index, "integer", other)),
        }
    }

    pub fn get_i32(&self, index: usize) -> DbResult<i32> {
        let value = self.get_i64(index)?;
        i32::try_from(value).map_err(|_| DbError::Decode {
            column: index,
            expected: "32-bit integer",
            found: "out-of-range integer",
        })
    }

    /// Reads a real column; integer storage widens to `f64`.
    pub fn get_f64(&self, index: usize) -> DbResult<f64> {
        match self.value(index, "real")? {
            Value::Real(value) => Ok(*value),
            Value::Integer(value) => Ok(*value as f64),
            other => Err(mismatch(index, "real", other)),
        }
    }

    pub fn get_text(&self, index: usize) -> DbResult<String> {
        match self.value(index, "text")? {
            Value::Text(value) => Ok(value.clone()),
            other => Err(mismatch(index, "text", other)),
        }
    }

    pub fn get_opt_text(&self, index: usize) -> DbResult<Option<String>> {
        match self.value(index, "text or null")? {
            Value::Null => Ok(None),
            Value::Text(value) => Ok(Some(value.clone())),
            other => Err(mismatch(index, "text or null", other)),
        }
    }

    fn value(&self, index: usize, expected: &'static str) -> DbResult<&Value> {
        self.values.get(index).ok_or(DbError::Decode {
            column: index,
            expected,
            found: "missing column",
        })
    }
}

fn mismatch(index: usize, expected: &'static str, found: &Value) -> DbError {
    DbError::Decode {
        column: index,
        expected,
        found: value_kind(found),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Integer(_) => "integer",
        Value::Real(_) => "real",
        Value::Text(_) => "text",
        Value::Blob(_) => "blob",
    }
}
