//! Feature modules consuming the configuration engine.
//!
//! Each feature owns a manifest built once at startup, a guild-keyed
//! row selector, and a handler that drives a configuration session for
//! the triggering admin.

pub mod gateway;
pub mod logging;
pub mod suggestions;

use std::sync::Arc;

use serde_json::Value;
use steward_core::config::{ConfigSession, Manifest, RowSelector, SelectorFn};
use steward_core::transport::Transport;
use steward_types::component::OutboundMessage;
use steward_types::interaction::CommandTrigger;
use tracing::warn;

use crate::state::AppState;

/// Row selector shared by every feature: one record per guild.
pub(crate) fn guild_selector() -> SelectorFn {
    Arc::new(|scope| RowSelector::new("guild_id", scope.guild_id.as_str()))
}

/// Reject picker values that are not plausible channel ids.
pub(crate) fn validate_channel_id(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(id) if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) => Ok(()),
        _ => Err("Select a text channel".to_string()),
    }
}

/// Guard the trigger, bootstrap the guild record, and run a session to
/// completion.
pub(crate) async fn run_config_session(
    state: &AppState,
    trigger: CommandTrigger,
    manifest: Arc<Manifest>,
) -> anyhow::Result<()> {
    let Some(guild_id) = trigger.guild_id.clone() else {
        let notice =
            OutboundMessage::ephemeral_text("Run this command in a server to configure it");
        if let Err(err) = state.transport.follow_up(&trigger.token, &notice).await {
            warn!(%err, "failed to send guild-only notice");
        }
        return Ok(());
    };

    state.guilds.ensure(&guild_id).await?;

    let mut session = ConfigSession::new(
        manifest,
        Arc::clone(&state.settings),
        Arc::clone(&state.transport),
        state.hub.clone(),
        guild_selector(),
    );
    session.initialize(&trigger).await?;

    Ok(())
}
