//! Gateway (join/leave message) configuration.

use std::sync::{Arc, LazyLock};

use steward_core::config::{ConfigOption, Manifest};
use steward_types::interaction::CommandTrigger;

use crate::state::AppState;

use super::{run_config_session, validate_channel_id};

static MANIFEST: LazyLock<Arc<Manifest>> = LazyLock::new(|| {
    Arc::new(
        Manifest::build(
            "guild",
            vec![
                ConfigOption::channel(
                    "Gateway channel",
                    "New members will be welcomed here.",
                    "gateway_channel",
                )
                .placeholder("Select a gateway channel")
                .validate(validate_channel_id),
                // Join
                ConfigOption::text(
                    "Gateway join title",
                    "Message title when a user joins.",
                    "gateway_join_title",
                )
                .placeholder("Welcome [mention]!"),
                ConfigOption::text(
                    "Gateway join content",
                    "Message content when a user joins.",
                    "gateway_join_content",
                )
                .placeholder("We hope you enjoy your stay!")
                .paragraph(),
                // Leave
                ConfigOption::text(
                    "Gateway leave title",
                    "Message title when a user leaves.",
                    "gateway_leave_title",
                )
                .placeholder("Goodbye [mention]!"),
                ConfigOption::text(
                    "Gateway leave content",
                    "Message content when a user leaves.",
                    "gateway_leave_content",
                )
                .placeholder("We are sorry to see you go [mention]")
                .paragraph(),
            ],
        )
        .expect("gateway manifest is valid"),
    )
});

pub fn manifest() -> Arc<Manifest> {
    Arc::clone(&MANIFEST)
}

/// Handle `config-gateway`.
pub async fn run(state: &AppState, trigger: CommandTrigger) -> anyhow::Result<()> {
    run_config_session(state, trigger, manifest()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use steward_core::config::OptionKind;

    #[test]
    fn manifest_shape() {
        let manifest = manifest();
        assert_eq!(manifest.table(), "guild");
        assert_eq!(manifest.options().len(), 5);
        assert!(matches!(
            manifest.options()[0].kind(),
            OptionKind::Channel { .. }
        ));
        assert_eq!(
            manifest.columns(),
            vec![
                "gateway_channel",
                "gateway_join_title",
                "gateway_join_content",
                "gateway_leave_title",
                "gateway_leave_content",
            ]
        );
    }

    #[test]
    fn gateway_channel_rejects_non_channel_values() {
        let manifest = manifest();
        let option = manifest
            .option_by_token("config-message-gateway_channel")
            .unwrap();
        assert!(option.validate_value(&json!("1234")).is_ok());
        assert!(option.validate_value(&json!("general")).is_err());
    }
}
