//! Prompt flows: one short-lived input ritual per option kind.
//!
//! Each flow renders a type-appropriate control, takes a collector
//! scoped to that control's correlation token and the triggering user,
//! and waits out a bounded window. A lapsed window yields
//! [`PromptOutcome::NoChange`], never an error.

use std::time::Duration;

use serde_json::Value;
use steward_types::component::{
    ButtonStyle, Component, Modal, OutboundMessage, TextInput, TextInputStyle,
};
use steward_types::error::ConfigError;
use steward_types::ids::ChannelId;
use steward_types::interaction::{ComponentAction, ComponentEvent, Interaction};
use tracing::debug;

use crate::interaction::InteractionHub;
use crate::transport::Transport;

use super::format::is_truthy;
use super::option::{ConfigOption, OptionKind};

/// How long each prompt flow waits for user input.
pub const PROMPT_TIMEOUT: Duration = Duration::from_secs(2 * 60);

/// What a prompt flow produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// A new raw value in UI space (not yet validated or encoded).
    Value(Value),
    /// The user explicitly cleared the setting.
    Clear,
    /// Invert the stored boolean, computed store-side.
    Toggle,
    /// The window lapsed without input; the store stays untouched.
    NoChange,
}

/// Collect a new value for `option` from the user who triggered `event`.
///
/// `current` is the decoded stored value, used to pre-fill controls.
pub async fn prompt_option_value<T: Transport>(
    transport: &T,
    hub: &InteractionHub,
    event: &ComponentEvent,
    option: &ConfigOption,
    current: &Value,
    timeout: Duration,
) -> Result<PromptOutcome, ConfigError> {
    match option.kind() {
        OptionKind::Text { placeholder, style } => {
            prompt_text(
                transport,
                hub,
                event,
                option,
                current,
                placeholder.clone(),
                *style,
                timeout,
            )
            .await
        }
        OptionKind::Boolean => prompt_toggle(transport, hub, event, option, current, timeout).await,
        OptionKind::Channel { placeholder } => {
            prompt_picker(
                transport,
                hub,
                event,
                option,
                PickerKind::Channel {
                    default: current.as_str().map(ChannelId::new),
                },
                placeholder.clone(),
                timeout,
            )
            .await
        }
        OptionKind::Role { placeholder } => {
            prompt_picker(
                transport,
                hub,
                event,
                option,
                PickerKind::Role,
                placeholder.clone(),
                timeout,
            )
            .await
        }
        OptionKind::Select { .. } => Err(ConfigError::Unsupported("select")),
    }
}

/// Get the user input through a modal with a single text field.
#[allow(clippy::too_many_arguments)]
async fn prompt_text<T: Transport>(
    transport: &T,
    hub: &InteractionHub,
    event: &ComponentEvent,
    option: &ConfigOption,
    current: &Value,
    placeholder: Option<String>,
    style: TextInputStyle,
    timeout: Duration,
) -> Result<PromptOutcome, ConfigError> {
    let modal_id = option.custom_id(Some("modal"));
    let input_id = option.custom_id(Some("modal-input"));

    let modal = Modal {
        custom_id: modal_id.clone(),
        title: option.name().to_string(),
        inputs: vec![TextInput {
            custom_id: input_id.clone(),
            label: option.name().to_string(),
            value: current.as_str().map(str::to_string),
            placeholder,
            style,
            required: option.is_required(),
        }],
    };

    // Subscribe before showing the modal so a fast submit cannot race
    // past the collector.
    let user_id = event.user_id.clone();
    let mut collector = hub.collect(timeout, move |ev| {
        matches!(ev, Interaction::ModalSubmit(submit)
            if submit.custom_id == modal_id && submit.user_id == user_id)
    });

    transport.open_modal(event, &modal).await?;

    let Some(Interaction::ModalSubmit(submit)) = collector.next().await else {
        debug!(column = option.column(), "text prompt timed out");
        return Ok(PromptOutcome::NoChange);
    };

    transport.acknowledge(&submit.token).await?;

    // A missing field means the user submitted the dialog with the
    // input cleared; the stored value becomes unset.
    match submit.field(&input_id) {
        Some(text) => Ok(PromptOutcome::Value(Value::from(text))),
        None => Ok(PromptOutcome::Clear),
    }
}

/// Show a toggle button reflecting the current state and wait for a
/// click. The returned outcome is a store-side invert instruction, not
/// a value computed from the snapshot read at render time.
async fn prompt_toggle<T: Transport>(
    transport: &T,
    hub: &InteractionHub,
    event: &ComponentEvent,
    option: &ConfigOption,
    current: &Value,
    timeout: Duration,
) -> Result<PromptOutcome, ConfigError> {
    let enabled = is_truthy(current);
    let button_id = option.custom_id(Some("toggle"));

    let message = OutboundMessage {
        content: Some(format!(
            "**{}** is currently {}.",
            option.name(),
            if enabled { "enabled" } else { "disabled" }
        )),
        components: vec![Component::Button {
            custom_id: button_id.clone(),
            label: if enabled { "Disable" } else { "Enable" }.to_string(),
            style: if enabled {
                ButtonStyle::Danger
            } else {
                ButtonStyle::Success
            },
            emoji: option.emoji_hint().map(str::to_string),
        }],
        ephemeral: true,
        ..OutboundMessage::default()
    };

    // Subscribe before rendering so a click cannot land between the
    // follow-up and the collector.
    let user_id = event.user_id.clone();
    let filter_id = button_id.clone();
    let mut collector = hub.collect(timeout, move |ev| {
        matches!(ev, Interaction::Component(click)
            if click.custom_id == filter_id && click.user_id == user_id)
    });

    let prompt = transport.follow_up(&event.token, &message).await?;

    while let Some(Interaction::Component(click)) = collector.next().await {
        // Same control id on another surface belongs to another session.
        if click.message_id != prompt.message_id {
            continue;
        }
        transport.acknowledge(&click.token).await?;
        return Ok(PromptOutcome::Toggle);
    }

    debug!(column = option.column(), "toggle prompt timed out");
    Ok(PromptOutcome::NoChange)
}

enum PickerKind {
    Channel { default: Option<ChannelId> },
    Role,
}

/// Show a single-select entity picker and wait for a submission.
/// Submitting with nothing selected clears the setting.
async fn prompt_picker<T: Transport>(
    transport: &T,
    hub: &InteractionHub,
    event: &ComponentEvent,
    option: &ConfigOption,
    kind: PickerKind,
    placeholder: Option<String>,
    timeout: Duration,
) -> Result<PromptOutcome, ConfigError> {
    let picker_id = option.custom_id(Some("picker"));

    let component = match kind {
        PickerKind::Channel { default } => Component::ChannelSelect {
            custom_id: picker_id.clone(),
            placeholder,
            default,
        },
        PickerKind::Role => Component::RoleSelect {
            custom_id: picker_id.clone(),
            placeholder,
        },
    };

    let message = OutboundMessage {
        content: Some(format!("**{}** — {}", option.name(), option.description())),
        components: vec![component],
        ephemeral: true,
        ..OutboundMessage::default()
    };

    // Subscribe before rendering so a submission cannot land between
    // the follow-up and the collector.
    let user_id = event.user_id.clone();
    let filter_id = picker_id.clone();
    let mut collector = hub.collect(timeout, move |ev| {
        matches!(ev, Interaction::Component(pick)
            if pick.custom_id == filter_id && pick.user_id == user_id)
    });

    let prompt = transport.follow_up(&event.token, &message).await?;

    while let Some(Interaction::Component(pick)) = collector.next().await {
        // Same control id on another surface belongs to another session.
        if pick.message_id != prompt.message_id {
            continue;
        }

        transport.acknowledge(&pick.token).await?;

        let selected = match &pick.action {
            ComponentAction::ChannelSelect { values } => {
                values.first().map(|id| Value::from(id.as_str()))
            }
            ComponentAction::RoleSelect { values } => {
                values.first().map(|id| Value::from(id.as_str()))
            }
            _ => None,
        };

        return Ok(match selected {
            Some(value) => PromptOutcome::Value(value),
            None => PromptOutcome::Clear,
        });
    }

    debug!(column = option.column(), "picker prompt timed out");
    Ok(PromptOutcome::NoChange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{click, modal_submit, picker_submit, RecordingTransport};
    use serde_json::json;
    use std::sync::Arc;
    use steward_types::ids::{GuildId, MessageId, RoleId, UserId};

    fn menu_event() -> ComponentEvent {
        ComponentEvent {
            custom_id: MAIN_MENU_TOKEN.to_string(),
            guild_id: Some(GuildId::new("g1")),
            user_id: UserId::new("u1"),
            message_id: MessageId::new("menu-msg"),
            action: ComponentAction::StringSelect {
                values: vec!["config-message-x".to_string()],
            },
            token: "menu-token".to_string(),
        }
    }

    const MAIN_MENU_TOKEN: &str = "config-main-menu";
    const SHORT: Duration = Duration::from_millis(50);
    const LONG: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn text_flow_yields_submitted_value() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::text("Join title", "desc", "gateway_join_title");
        let event = menu_event();

        let flow = {
            let transport = Arc::clone(&transport);
            let hub = hub.clone();
            let option = option.clone();
            tokio::spawn(async move {
                prompt_option_value(&*transport, &hub, &event, &option, &json!("old"), LONG).await
            })
        };

        // Wait for the modal to open, then submit it.
        transport.wait_for_modal().await;
        hub.publish(modal_submit(
            "config-message-gateway_join_title-modal",
            "config-message-gateway_join_title-modal-input",
            "hello",
            "u1",
        ));

        let outcome = flow.await.unwrap().unwrap();
        assert_eq!(outcome, PromptOutcome::Value(json!("hello")));

        // The modal was pre-filled with the current value, and the
        // submission was silently acknowledged.
        let modal = transport.modals().pop().unwrap();
        assert_eq!(modal.inputs[0].value.as_deref(), Some("old"));
        assert_eq!(transport.acks().len(), 1);
    }

    #[tokio::test]
    async fn text_flow_missing_field_clears() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::text("Join title", "desc", "gateway_join_title");
        let event = menu_event();

        let flow = {
            let transport = Arc::clone(&transport);
            let hub = hub.clone();
            let option = option.clone();
            tokio::spawn(async move {
                prompt_option_value(&*transport, &hub, &event, &option, &Value::Null, LONG).await
            })
        };

        transport.wait_for_modal().await;
        hub.publish(modal_submit(
            "config-message-gateway_join_title-modal",
            "some-other-field",
            "",
            "u1",
        ));

        let outcome = flow.await.unwrap().unwrap();
        assert_eq!(outcome, PromptOutcome::Clear);
    }

    #[tokio::test]
    async fn text_flow_times_out_to_no_change() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::text("Join title", "desc", "gateway_join_title");
        let event = menu_event();

        let outcome =
            prompt_option_value(&*transport, &hub, &event, &option, &Value::Null, SHORT)
                .await
                .unwrap();
        assert_eq!(outcome, PromptOutcome::NoChange);
    }

    #[tokio::test]
    async fn text_flow_ignores_other_users() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::text("Join title", "desc", "gateway_join_title");
        let event = menu_event();

        let flow = {
            let transport = Arc::clone(&transport);
            let hub = hub.clone();
            let option = option.clone();
            tokio::spawn(async move {
                prompt_option_value(&*transport, &hub, &event, &option, &Value::Null, SHORT).await
            })
        };

        transport.wait_for_modal().await;
        hub.publish(modal_submit(
            "config-message-gateway_join_title-modal",
            "config-message-gateway_join_title-modal-input",
            "spoofed",
            "someone-else",
        ));

        let outcome = flow.await.unwrap().unwrap();
        assert_eq!(outcome, PromptOutcome::NoChange);
    }

    #[tokio::test]
    async fn toggle_flow_yields_store_side_invert() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::boolean("Suggestions", "desc", "suggestions_enabled");
        let event = menu_event();

        let flow = {
            let transport = Arc::clone(&transport);
            let hub = hub.clone();
            let option = option.clone();
            tokio::spawn(async move {
                prompt_option_value(&*transport, &hub, &event, &option, &json!(0), LONG).await
            })
        };

        let prompt = transport.wait_for_follow_up().await;
        hub.publish(click(
            "config-message-suggestions_enabled-toggle",
            "u1",
            prompt.message_id.as_str(),
        ));

        let outcome = flow.await.unwrap().unwrap();
        assert_eq!(outcome, PromptOutcome::Toggle);

        // Button label reflected the disabled state.
        let messages = transport.follow_ups();
        let Component::Button { label, style, .. } = &messages[0].1.components[0] else {
            panic!("expected a button");
        };
        assert_eq!(label, "Enable");
        assert_eq!(*style, ButtonStyle::Success);
    }

    #[tokio::test]
    async fn toggle_flow_shows_disable_when_enabled() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::boolean("Suggestions", "desc", "suggestions_enabled");
        let event = menu_event();

        let outcome =
            prompt_option_value(&*transport, &hub, &event, &option, &json!(1), SHORT)
                .await
                .unwrap();
        assert_eq!(outcome, PromptOutcome::NoChange);

        let follow_ups = transport.follow_ups();
        let Component::Button { label, style, .. } = &follow_ups[0].1.components[0] else {
            panic!("expected a button");
        };
        assert_eq!(label, "Disable");
        assert_eq!(*style, ButtonStyle::Danger);
    }

    #[tokio::test]
    async fn channel_flow_yields_selected_id() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::channel("Gateway channel", "desc", "gateway_channel");
        let event = menu_event();

        let flow = {
            let transport = Arc::clone(&transport);
            let hub = hub.clone();
            let option = option.clone();
            tokio::spawn(async move {
                prompt_option_value(&*transport, &hub, &event, &option, &Value::Null, LONG).await
            })
        };

        let prompt = transport.wait_for_follow_up().await;
        hub.publish(picker_submit(
            "config-message-gateway_channel-picker",
            ComponentAction::ChannelSelect {
                values: vec![ChannelId::new("C1")],
            },
            "u1",
            prompt.message_id.as_str(),
        ));

        let outcome = flow.await.unwrap().unwrap();
        assert_eq!(outcome, PromptOutcome::Value(json!("C1")));
    }

    #[tokio::test]
    async fn channel_flow_empty_selection_clears() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::channel("Gateway channel", "desc", "gateway_channel");
        let event = menu_event();

        let flow = {
            let transport = Arc::clone(&transport);
            let hub = hub.clone();
            let option = option.clone();
            tokio::spawn(async move {
                prompt_option_value(&*transport, &hub, &event, &option, &json!("C1"), LONG).await
            })
        };

        let prompt = transport.wait_for_follow_up().await;
        hub.publish(picker_submit(
            "config-message-gateway_channel-picker",
            ComponentAction::ChannelSelect { values: Vec::new() },
            "u1",
            prompt.message_id.as_str(),
        ));

        let outcome = flow.await.unwrap().unwrap();
        assert_eq!(outcome, PromptOutcome::Clear);

        // The picker was pre-seeded with the current channel.
        let follow_ups = transport.follow_ups();
        let Component::ChannelSelect { default, .. } = &follow_ups[0].1.components[0] else {
            panic!("expected a channel select");
        };
        assert_eq!(default.as_ref().map(|c| c.as_str()), Some("C1"));
    }

    #[tokio::test]
    async fn role_flow_yields_selected_id() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::role("Manager role", "desc", "suggestion_manager_role");
        let event = menu_event();

        let flow = {
            let transport = Arc::clone(&transport);
            let hub = hub.clone();
            let option = option.clone();
            tokio::spawn(async move {
                prompt_option_value(&*transport, &hub, &event, &option, &Value::Null, LONG).await
            })
        };

        let prompt = transport.wait_for_follow_up().await;
        hub.publish(picker_submit(
            "config-message-suggestion_manager_role-picker",
            ComponentAction::RoleSelect {
                values: vec![RoleId::new("R1")],
            },
            "u1",
            prompt.message_id.as_str(),
        ));

        let outcome = flow.await.unwrap().unwrap();
        assert_eq!(outcome, PromptOutcome::Value(json!("R1")));
    }

    #[tokio::test]
    async fn select_kind_is_explicitly_unsupported() {
        let transport = Arc::new(RecordingTransport::new());
        let hub = InteractionHub::new();
        let option = ConfigOption::select("Mode", "desc", "logging_mode", Vec::new());
        let event = menu_event();

        let err = prompt_option_value(&*transport, &hub, &event, &option, &Value::Null, LONG)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Unsupported("select")));

        // Nothing was rendered for the unsupported kind.
        assert!(transport.follow_ups().is_empty());
        assert!(transport.modals().is_empty());
    }
}
