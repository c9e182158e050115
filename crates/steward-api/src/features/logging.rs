//! Message logging configuration.
//!
//! The logging mode is stored as a bitmask integer but edited as a
//! string choice, so the option carries both storage transforms. The
//! mode option is declared as `select`; until the select prompt flow
//! exists, choosing it surfaces the engine's unsupported notice.

use std::sync::{Arc, LazyLock};

use serde_json::Value;
use steward_core::config::{ConfigOption, Manifest};
use steward_types::component::SelectChoice;
use steward_types::interaction::CommandTrigger;

use crate::state::AppState;

use super::{run_config_session, validate_channel_id};

/// Bitmask values for `logging_mode`: deletes = 1, edits = 2.
fn mode_choices() -> Vec<SelectChoice> {
    vec![
        SelectChoice::new("None", "0"),
        SelectChoice::new("Deletes", "1"),
        SelectChoice::new("Edits", "2"),
        SelectChoice::new("Deletes & Edits", "3"),
    ]
}

fn mode_is_valid(value: &Value) -> bool {
    value
        .as_str()
        .and_then(|s| s.parse::<i64>().ok())
        .is_some_and(|n| (0..=3).contains(&n))
}

static MANIFEST: LazyLock<Arc<Manifest>> = LazyLock::new(|| {
    Arc::new(
        Manifest::build(
            "guild",
            vec![
                ConfigOption::select(
                    "Logging mode",
                    "Determines what should be logged.",
                    "logging_mode",
                    mode_choices(),
                )
                .placeholder("Select a logging mode")
                .validate(|value| {
                    if mode_is_valid(value) {
                        Ok(())
                    } else {
                        Err("The provided logging mode is invalid".to_string())
                    }
                })
                .to_store(|value| {
                    value
                        .as_str()
                        .and_then(|s| s.parse::<i64>().ok())
                        .map(Value::from)
                        .unwrap_or(Value::Null)
                })
                .from_store(|value| match value.as_i64() {
                    Some(n) => Value::from(n.to_string()),
                    None => Value::from(""),
                }),
                ConfigOption::channel(
                    "Logging channel",
                    "Log messages will be sent here.",
                    "logging_channel",
                )
                .placeholder("Select a logging channel")
                .validate(validate_channel_id),
            ],
        )
        .expect("logging manifest is valid"),
    )
});

pub fn manifest() -> Arc<Manifest> {
    Arc::clone(&MANIFEST)
}

/// Handle `config-logging`.
pub async fn run(state: &AppState, trigger: CommandTrigger) -> anyhow::Result<()> {
    run_config_session(state, trigger, manifest()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn manifest_shape() {
        let manifest = manifest();
        assert_eq!(manifest.options().len(), 2);
        assert_eq!(manifest.options()[0].kind().name(), "select");
        assert_eq!(manifest.options()[1].kind().name(), "channel");
    }

    #[test]
    fn mode_validation_accepts_known_modes_only() {
        let manifest = manifest();
        let mode = manifest.option_by_token("config-message-logging_mode").unwrap();

        for accepted in ["0", "1", "2", "3"] {
            assert!(mode.validate_value(&json!(accepted)).is_ok());
        }
        assert_eq!(
            mode.validate_value(&json!("7")),
            Err("The provided logging mode is invalid".to_string())
        );
        assert!(mode.validate_value(&json!("deletes")).is_err());
    }

    #[test]
    fn mode_transforms_roundtrip_for_accepted_values() {
        let manifest = manifest();
        let mode = manifest.option_by_token("config-message-logging_mode").unwrap();

        for raw in ["0", "1", "2", "3"] {
            let stored = mode.encode(json!(raw));
            assert!(stored.is_i64(), "mode should be stored as an integer");
            assert_eq!(mode.decode(stored), json!(raw));
        }
    }

    #[test]
    fn missing_mode_decodes_to_empty_string() {
        let manifest = manifest();
        let mode = manifest.option_by_token("config-message-logging_mode").unwrap();
        assert_eq!(mode.decode(Value::Null), json!(""));
    }
}
