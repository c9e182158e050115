//! Suggestion management configuration.

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
                    "Suggestion channel",
                    "Suggestions will be sent here.",
                    "suggestion_channel",
                )
                .placeholder("Select a suggestion channel")
                .validate(validate_channel_id),
                ConfigOption::role(
                    "Suggestion manager role",
                    "The role that can approve and reject suggestions.",
                    "suggestion_manager_role",
                )
                .placeholder("Select a manager role"),
                ConfigOption::boolean(
                    "Suggestions enabled",
                    "Whether new suggestions are collected.",
                    "suggestions_enabled",
                ),
                ConfigOption::text(
                    "Suggestion upvote emoji",
                    "The emoji for upvoting suggestions.",
                    "suggestion_upvote_emoji",
                )
                .label("Set upvote emoji")
                .emoji("👍"),
                ConfigOption::text(
                    "Suggestion downvote emoji",
                    "The emoji for downvoting suggestions.",
                    "suggestion_downvote_emoji",
                )
                .label("Set downvote emoji")
                .emoji("👎"),
            ],
        )
        .expect("suggestions manifest is valid"),
    )
});

pub fn manifest() -> Arc<Manifest> {
    Arc::clone(&MANIFEST)
}

/// Handle `config-suggestions`.
pub async fn run(state: &AppState, trigger: CommandTrigger) -> anyhow::Result<()> {
    run_config_session(state, trigger, manifest()).await
}
