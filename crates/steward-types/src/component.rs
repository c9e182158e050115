//! Outbound UI model: messages, embeds, components, and modals.
//!
//! These types are what the configuration engine renders. A transport
//! adapter serializes them into whatever shape the platform REST API
//! expects; the engine itself never touches wire formats.

use serde::{Deserialize, Serialize};

use crate::ids::{ChannelId, MessageId};

/// Visual style of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// Input style of a modal text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextInputStyle {
    /// Single-line input.
    Short,
    /// Multi-line input.
    Paragraph,
}

/// One choice of a string select menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectChoice {
    pub label: String,
    pub value: String,
}

impl SelectChoice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// An interactive control attached to a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Button {
        custom_id: String,
        label: String,
        style: ButtonStyle,
        #[serde(skip_serializing_if = "Option::is_none")]
        emoji: Option<String>,
    },
    StringSelect {
        custom_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        choices: Vec<SelectChoice>,
    },
    ChannelSelect {
        custom_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        /// Pre-seeded selection shown when the picker opens.
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<ChannelId>,
    },
    RoleSelect {
        custom_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
}

impl Component {
    /// Correlation token of this control.
    pub fn custom_id(&self) -> &str {
        match self {
            Component::Button { custom_id, .. }
            | Component::StringSelect { custom_id, .. }
            | Component::ChannelSelect { custom_id, .. }
            | Component::RoleSelect { custom_id, .. } => custom_id,
        }
    }
}

/// A rich embed block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
}

/// A message the bot sends or edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutboundMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub ephemeral: bool,
}

impl OutboundMessage {
    /// A plain ephemeral text message.
    pub fn ephemeral_text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ephemeral: true,
            ..Self::default()
        }
    }
}

/// One text input of a modal dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextInput {
    pub custom_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub style: TextInputStyle,
    pub required: bool,
}

/// A modal dialog opened in response to a component interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modal {
    pub custom_id: String,
    pub title: String,
    pub inputs: Vec<TextInput>,
}

/// Handle to a message the bot owns and can later edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHandle {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    /// Reply token the message was created under.
    pub token: String,
}
