//! Command routing.
//!
//! Maps slash-command names to their feature handlers. Configuration
//! sessions run for minutes, so handlers are spawned rather than
//! awaited inside the webhook request.

use steward_types::interaction::CommandTrigger;
use tracing::{error, warn};

use crate::features;
use crate::state::AppState;

/// Route a command invocation to its feature handler.
pub fn dispatch(state: AppState, trigger: CommandTrigger) {
    tokio::spawn(async move {
        let command = trigger.command.clone();
        let result = match command.as_str() {
            "config-gateway" => features::gateway::run(&state, trigger).await,
            "config-logging" => features::logging::run(&state, trigger).await,
            "config-suggestions" => features::suggestions::run(&state, trigger).await,
            other => {
                warn!(command = other, "unknown command");
                Ok(())
            }
        };

        if let Err(err) = result {
            error!(command = %command, %err, "command handler failed");
        }
    });
}
