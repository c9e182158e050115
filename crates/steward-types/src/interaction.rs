//! Inbound interaction events from the chat platform.
//!
//! The platform boundary (steward-api) decodes wire payloads into these
//! types and publishes them into the interaction hub. The configuration
//! engine correlates them back to manifest options via `custom_id`.

use serde::{Deserialize, Serialize};

use crate::ids::{ChannelId, GuildId, MessageId, RoleId, UserId};

/// A slash-command invocation that can start a configuration session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandTrigger {
    /// Command name, e.g. `config-gateway`.
    pub command: String,
    /// Guild the command ran in; `None` for direct messages.
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub user_id: UserId,
    /// Short-lived token for replying to this invocation.
    pub token: String,
}

impl CommandTrigger {
    /// The guild/user scope of this trigger, if it ran inside a guild.
    pub fn scope(&self) -> Option<EventScope> {
        self.guild_id.as_ref().map(|guild_id| EventScope {
            guild_id: guild_id.clone(),
            user_id: self.user_id.clone(),
        })
    }
}

/// The payload a message component delivered when it was used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentAction {
    Button,
    StringSelect { values: Vec<String> },
    ChannelSelect { values: Vec<ChannelId> },
    RoleSelect { values: Vec<RoleId> },
}

/// A component interaction (button click or select submission) on a
/// message the bot rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentEvent {
    /// Correlation token of the control that fired.
    pub custom_id: String,
    pub guild_id: Option<GuildId>,
    pub user_id: UserId,
    /// The message the component lives on.
    pub message_id: MessageId,
    pub action: ComponentAction,
    pub token: String,
}

impl ComponentEvent {
    pub fn scope(&self) -> Option<EventScope> {
        self.guild_id.as_ref().map(|guild_id| EventScope {
            guild_id: guild_id.clone(),
            user_id: self.user_id.clone(),
        })
    }
}

/// A submitted modal dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalSubmitEvent {
    /// Correlation token of the modal that was submitted.
    pub custom_id: String,
    pub guild_id: Option<GuildId>,
    pub user_id: UserId,
    /// Submitted text inputs, keyed by their own correlation tokens.
    pub fields: Vec<ModalFieldValue>,
    pub token: String,
}

/// One submitted field of a modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalFieldValue {
    pub custom_id: String,
    pub value: String,
}

impl ModalSubmitEvent {
    /// Look up a submitted field by its correlation token.
    pub fn field(&self, custom_id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.custom_id == custom_id)
            .map(|f| f.value.as_str())
    }
}

/// Any user-triggered event the engine can collect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interaction {
    Component(ComponentEvent),
    ModalSubmit(ModalSubmitEvent),
}

impl Interaction {
    /// Correlation token of the control this event came from.
    pub fn custom_id(&self) -> &str {
        match self {
            Interaction::Component(ev) => &ev.custom_id,
            Interaction::ModalSubmit(ev) => &ev.custom_id,
        }
    }

    pub fn user_id(&self) -> &UserId {
        match self {
            Interaction::Component(ev) => &ev.user_id,
            Interaction::ModalSubmit(ev) => &ev.user_id,
        }
    }

    /// The message this event happened on, if any (modal submissions
    /// are not tied to a message).
    pub fn message_id(&self) -> Option<&MessageId> {
        match self {
            Interaction::Component(ev) => Some(&ev.message_id),
            Interaction::ModalSubmit(_) => None,
        }
    }
}

/// Guild/user identity extracted from a triggering event.
///
/// This is the narrow input handed to the caller-supplied row-selector
/// strategy; the engine never inspects anything else about the trigger
/// when addressing storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventScope {
    pub guild_id: GuildId,
    pub user_id: UserId,
}
