//! SQLite settings store implementation.
//!
//! Implements `SettingsStore` from `steward-core` using sqlx with split
//! read/write pools. Tables and columns come from manifests built at
//! startup, so identifiers are validated and quoted rather than bound.
//! Values cross the boundary as JSON values mapped onto SQLite's
//! dynamic types.

use std::collections::HashMap;

use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};
use steward_core::config::{SettingsStore, StoreContext, WriteOp};
use steward_types::error::StoreError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SettingsStore`.
pub struct SqliteSettingsStore {
    pool: DatabasePool,
}

impl SqliteSettingsStore {
    /// Create a new settings store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate a table/column identifier before it is interpolated into SQL.
///
/// Identifiers come from manifests, not users, but a typo must fail as a
/// query error instead of producing malformed SQL.
fn ident(name: &str) -> Result<&str, StoreError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest {
        Ok(name)
    } else {
        Err(StoreError::Query(format!("invalid identifier '{name}'")))
    }
}

/// Decode one SQLite column into a JSON value based on its dynamic type.
fn column_value(row: &SqliteRow, idx: usize) -> Result<Value, StoreError> {
    let raw = row
        .try_get_raw(idx)
        .map_err(|e| StoreError::Query(e.to_string()))?;

    if raw.is_null() {
        return Ok(Value::Null);
    }

    match raw.type_info().name() {
        "TEXT" => {
            let s: String = row
                .try_get(idx)
                .map_err(|e| StoreError::Query(e.to_string()))?;
            Ok(Value::String(s))
        }
        "INTEGER" => {
            let n: i64 = row
                .try_get(idx)
                .map_err(|e| StoreError::Query(e.to_string()))?;
            Ok(Value::from(n))
        }
        "REAL" => {
            let f: f64 = row
                .try_get(idx)
                .map_err(|e| StoreError::Query(e.to_string()))?;
            Ok(Value::from(f))
        }
        other => Err(StoreError::Query(format!(
            "unsupported column type '{other}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// SettingsStore implementation
// ---------------------------------------------------------------------------

impl SettingsStore for SqliteSettingsStore {
    async fn read(
        &self,
        ctx: &StoreContext,
        columns: &[String],
    ) -> Result<HashMap<String, Value>, StoreError> {
        let table = ident(&ctx.table)?;
        let key_column = ident(&ctx.selector.column)?;
        let select_list = columns
            .iter()
            .map(|c| ident(c).map(|c| format!("\"{c}\"")))
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");

        let sql = format!(r#"SELECT {select_list} FROM "{table}" WHERE "{key_column}" = ?"#);
        let row = sqlx::query(&sql)
            .bind(&ctx.selector.key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .ok_or(StoreError::NotFound)?;

        let mut values = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            values.insert(column.clone(), column_value(&row, idx)?);
        }

        Ok(values)
    }

    async fn write(&self, ctx: &StoreContext, column: &str, op: WriteOp) -> Result<(), StoreError> {
        let table = ident(&ctx.table)?;
        let key_column = ident(&ctx.selector.column)?;
        let column = ident(column)?;

        let result = match op {
            WriteOp::Set(value) => {
                let sql =
                    format!(r#"UPDATE "{table}" SET "{column}" = ? WHERE "{key_column}" = ?"#);
                let query = sqlx::query(&sql);
                let query = match value {
                    Value::Null => query.bind(None::<String>),
                    Value::Bool(b) => query.bind(i64::from(b)),
                    Value::Number(n) => {
                        if let Some(i) = n.as_i64() {
                            query.bind(i)
                        } else if let Some(f) = n.as_f64() {
                            query.bind(f)
                        } else {
                            return Err(StoreError::Query(format!(
                                "unrepresentable number for column '{column}'"
                            )));
                        }
                    }
                    Value::String(s) => query.bind(s),
                    other => {
                        return Err(StoreError::Query(format!(
                            "unsupported value type '{}' for column '{column}'",
                            value_kind(&other)
                        )));
                    }
                };
                query
                    .bind(&ctx.selector.key)
                    .execute(&self.pool.writer)
                    .await
                    .map_err(|e| StoreError::Query(e.to_string()))?
            }
            // The invert happens inside the store so two concurrent
            // sessions cannot clobber each other with stale snapshots.
            WriteOp::ToggleBool => {
                let sql = format!(
                    r#"UPDATE "{table}"
                       SET "{column}" = CASE WHEN "{column}" IS NULL OR "{column}" = 0 THEN 1 ELSE 0 END
                       WHERE "{key_column}" = ?"#
                );
                sqlx::query(&sql)
                    .bind(&ctx.selector.key)
                    .execute(&self.pool.writer)
                    .await
                    .map_err(|e| StoreError::Query(e.to_string()))?
            }
        };

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
