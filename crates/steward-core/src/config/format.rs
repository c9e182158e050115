//! Display formatting for stored option values.

use serde_json::Value;
use steward_types::ids::{ChannelId, RoleId};

use super::option::OptionKind;

/// Shown for options without a stored value.
pub const NOT_SET: &str = "(Not set)";

/// Whether a stored value counts as "on" for boolean options.
///
/// Boolean columns arrive as SQLite integers; a missing value reads as
/// off.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    }
}

/// Whether a collected value means "clear to unset".
pub fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Format a (decoded) stored value for the overview embed.
pub fn format_value(kind: &OptionKind, value: &Value) -> String {
    match kind {
        OptionKind::Boolean => {
            if is_truthy(value) {
                "Yes".to_string()
            } else {
                "No".to_string()
            }
        }
        OptionKind::Channel { .. } => match value.as_str() {
            Some(id) if !id.is_empty() => ChannelId::new(id).mention(),
            _ => NOT_SET.to_string(),
        },
        OptionKind::Role { .. } => match value.as_str() {
            Some(id) if !id.is_empty() => RoleId::new(id).mention(),
            _ => NOT_SET.to_string(),
        },
        OptionKind::Text { .. } | OptionKind::Select { .. } => match value {
            Value::String(s) if !s.is_empty() => format!("`{s}`"),
            Value::Number(n) => format!("`{n}`"),
            _ => NOT_SET.to_string(),
        },
    }
}
