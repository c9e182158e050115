//! Settings persistence abstraction.
//!
//! Deliberately minimal: one record addressed by a row selector, read a
//! few columns, write one. No transactions, cursors, or batches, so any
//! relational or key-value backend can sit behind it. The concrete
//! SQLite adapter lives in steward-infra.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use steward_types::error::StoreError;
use steward_types::interaction::EventScope;

/// Row selector: `WHERE <column> = <key>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSelector {
    pub column: String,
    pub key: String,
}

impl RowSelector {
    pub fn new(column: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            key: key.into(),
        }
    }
}

/// Full persistence coordinate for one operation: which table, which row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreContext {
    pub table: String,
    pub selector: RowSelector,
}

/// A single-column update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Set the column to a value; `Value::Null` clears it.
    Set(Value),
    /// Invert a boolean column atomically inside the store. Avoids the
    /// read-then-write race between concurrent sessions.
    ToggleBool,
}

/// Caller-supplied strategy resolving a triggering event's scope to a
/// row selector. The engine stays agnostic to how rows are addressed.
pub type SelectorFn = Arc<dyn Fn(&EventScope) -> RowSelector + Send + Sync>;

/// Minimal settings store.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait SettingsStore: Send + Sync {
    /// Read the given columns of exactly one record.
    ///
    /// Fails with [`StoreError::NotFound`] when no record matches the
    /// selector; the engine surfaces that as a missing-configuration
    /// failure rather than creating the row.
    fn read(
        &self,
        ctx: &StoreContext,
        columns: &[String],
    ) -> impl std::future::Future<Output = Result<HashMap<String, Value>, StoreError>> + Send;

    /// Apply a partial update to exactly one column of one record.
    fn write(
        &self,
        ctx: &StoreContext,
        column: &str,
        op: WriteOp,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use steward_types::ids::{GuildId, UserId};

    #[test]
    fn selector_fn_is_a_plain_strategy() {
        let resolve: SelectorFn =
            Arc::new(|scope| RowSelector::new("guild_id", scope.guild_id.as_str()));

        let scope = EventScope {
            guild_id: GuildId::new("g42"),
            user_id: UserId::new("u1"),
        };
        assert_eq!(resolve(&scope), RowSelector::new("guild_id", "g42"));
    }

    #[test]
    fn write_op_equality() {
        assert_eq!(
            WriteOp::Set(Value::Null),
            WriteOp::Set(Value::Null)
        );
        assert_ne!(WriteOp::Set(Value::Null), WriteOp::ToggleBool);
    }
}
