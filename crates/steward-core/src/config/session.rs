//! The interactive configuration session.
//!
//! One session per user-triggered configuration request. It owns exactly
//! one live UI message (overview embed + drill-down selector), runs at
//! most one prompt flow at a time, and applies every update through the
//! store abstraction. The session ends when its collector deadline
//! lapses, when a fatal error aborts it, or when `destroy` is called.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use steward_types::component::{Component, Embed, MessageHandle, OutboundMessage, SelectChoice};
use steward_types::error::ConfigError;
use steward_types::ids::ChannelId;
use steward_types::interaction::{
    CommandTrigger, ComponentAction, ComponentEvent, EventScope, Interaction,
};
use tracing::{debug, warn};

use crate::interaction::{Collector, InteractionHub};
use crate::transport::Transport;

use super::format::{format_value, is_unset};
use super::manifest::{Manifest, MAIN_MENU_ID};
use super::option::{ConfigOption, OptionKind};
use super::prompt::{prompt_option_value, PromptOutcome, PROMPT_TIMEOUT};
use super::store::{SelectorFn, SettingsStore, StoreContext, WriteOp};

/// How long the configuration message stays interactable.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(10 * 60);

const EMBED_COLOR: u32 = 0x3498db;

/// Tunable session lifetimes. Production code uses the defaults.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub expires_in: Duration,
    pub prompt_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            expires_in: SESSION_TIMEOUT,
            prompt_timeout: PROMPT_TIMEOUT,
        }
    }
}

/// Interactive editor for one manifest against one backing record.
pub struct ConfigSession<S, T> {
    manifest: Arc<Manifest>,
    store: Arc<S>,
    transport: Arc<T>,
    hub: InteractionHub,
    selector: SelectorFn,
    options: SessionOptions,
    /// The one live UI message this session owns.
    reply: Option<MessageHandle>,
    initialized: bool,
}

impl<S: SettingsStore, T: Transport> ConfigSession<S, T> {
    pub fn new(
        manifest: Arc<Manifest>,
        store: Arc<S>,
        transport: Arc<T>,
        hub: InteractionHub,
        selector: SelectorFn,
    ) -> Self {
        Self::with_options(
            manifest,
            store,
            transport,
            hub,
            selector,
            SessionOptions::default(),
        )
    }

    pub fn with_options(
        manifest: Arc<Manifest>,
        store: Arc<S>,
        transport: Arc<T>,
        hub: InteractionHub,
        selector: SelectorFn,
        options: SessionOptions,
    ) -> Self {
        Self {
            manifest,
            store,
            transport,
            hub,
            selector,
            options,
            reply: None,
            initialized: false,
        }
    }

    /// Whether the session still owns a live UI message.
    pub fn is_active(&self) -> bool {
        self.reply.is_some()
    }

    /// Reply with the configuration message and process option edits
    /// until the session deadline lapses.
    ///
    /// No-op outside a guild or when already initialized. Resolves once
    /// the session has ended; callers that should not wait spawn it.
    pub async fn initialize(&mut self, trigger: &CommandTrigger) -> Result<(), ConfigError> {
        let Some(scope) = trigger.scope() else {
            debug!(command = %trigger.command, "configuration command outside a guild, ignoring");
            return Ok(());
        };
        if self.initialized {
            debug!("configuration session already initialized");
            return Ok(());
        }
        self.initialized = true;

        let ctx = self.store_context(&scope);
        let message = self.overview_message(&ctx).await?;

        // Subscribe before replying so a selection cannot land between
        // the reply and the collector.
        let user_id = scope.user_id.clone();
        let collector = self.hub.collect(self.options.expires_in, move |ev| {
            matches!(ev, Interaction::Component(event)
                if event.custom_id == MAIN_MENU_ID && event.user_id == user_id)
        });

        match self.transport.reply(trigger, &message).await {
            Ok(handle) => self.reply = Some(handle),
            Err(err) => {
                warn!(%err, "failed to send configuration message");
                let apology =
                    OutboundMessage::ephemeral_text("Something went wrong... Try again later");
                if let Err(err) = self.transport.follow_up(&trigger.token, &apology).await {
                    warn!(%err, "failed to send apology follow-up");
                }
                self.destroy();
                return Ok(());
            }
        }

        self.listen(collector).await
    }

    /// Release the owned message reference. Idempotent.
    pub fn destroy(&mut self) {
        if self.reply.take().is_some() {
            debug!(table = self.manifest.table(), "configuration session destroyed");
        }
    }

    /// Process drill-down selections until the deadline lapses.
    async fn listen(&mut self, mut collector: Collector) -> Result<(), ConfigError> {
        while let Some(event) = collector.next().await {
            let Some(reply) = self.reply.clone() else {
                break;
            };
            let Interaction::Component(event) = event else {
                continue;
            };
            // The main menu id is shared across sessions; only events
            // on this session's own message belong to it.
            if event.message_id != reply.message_id {
                continue;
            }
            let ComponentAction::StringSelect { values } = &event.action else {
                continue;
            };
            let Some(token) = values.first() else {
                continue;
            };

            // A token we cannot map means the rendered UI and the
            // manifest disagree; that is an integration bug, not user
            // input, so it aborts the session.
            let Some(option) = self.manifest.option_by_token(token) else {
                self.destroy();
                return Err(ConfigError::UnknownToken(token.clone()));
            };
            let option = option.clone();

            match self.edit_option(&event, &option).await {
                Ok(()) => {}
                Err(ConfigError::Unsupported(kind)) => {
                    debug!(kind, option = option.name(), "option kind has no prompt flow");
                    let notice = OutboundMessage::ephemeral_text(format!(
                        "`{kind}` options cannot be edited yet."
                    ));
                    if let Err(err) = self.transport.follow_up(&event.token, &notice).await {
                        warn!(%err, "failed to send unsupported-option notice");
                    }
                }
                Err(err) => {
                    self.destroy();
                    return Err(err);
                }
            }
        }

        self.destroy();
        Ok(())
    }

    /// Run one prompt flow for `option` and persist its result.
    async fn edit_option(
        &mut self,
        event: &ComponentEvent,
        option: &ConfigOption,
    ) -> Result<(), ConfigError> {
        let Some(scope) = event.scope() else {
            debug!("component event outside a guild, ignoring");
            return Ok(());
        };
        let ctx = self.store_context(&scope);

        let columns = vec![option.column().to_string()];
        let stored = self.store.read(&ctx, &columns).await?;
        let current =
            option.decode(stored.get(option.column()).cloned().unwrap_or(Value::Null));

        loop {
            let outcome = prompt_option_value(
                &*self.transport,
                &self.hub,
                event,
                option,
                &current,
                self.options.prompt_timeout,
            )
            .await?;

            let ack = match outcome {
                PromptOutcome::NoChange => {
                    debug!(option = option.name(), "prompt ended without input");
                    return Ok(());
                }
                PromptOutcome::Toggle => {
                    self.store
                        .write(&ctx, option.column(), WriteOp::ToggleBool)
                        .await?;
                    "Setting toggled.".to_string()
                }
                PromptOutcome::Clear => {
                    self.store
                        .write(&ctx, option.column(), WriteOp::Set(Value::Null))
                        .await?;
                    "Value reset.".to_string()
                }
                PromptOutcome::Value(value) => {
                    if let Err(reason) = option.validate_value(&value) {
                        let rejection = OutboundMessage::ephemeral_text(reason);
                        self.transport.follow_up(&event.token, &rejection).await?;
                        // Re-prompt with the rejection shown; nothing
                        // was written.
                        continue;
                    }

                    if is_unset(&value) {
                        self.store
                            .write(&ctx, option.column(), WriteOp::Set(Value::Null))
                            .await?;
                        "Value reset.".to_string()
                    } else {
                        let ack = match option.kind() {
                            OptionKind::Channel { .. } => format!(
                                "Channel updated to {}.",
                                ChannelId::new(value.as_str().unwrap_or_default()).mention()
                            ),
                            _ => "Value updated.".to_string(),
                        };
                        self.store
                            .write(&ctx, option.column(), WriteOp::Set(option.encode(value)))
                            .await?;
                        ack
                    }
                }
            };

            self.transport
                .follow_up(&event.token, &OutboundMessage::ephemeral_text(ack))
                .await?;
            self.refresh_overview(&ctx).await?;
            return Ok(());
        }
    }

    /// Re-render the owning overview message in place so it reflects
    /// the just-written value.
    async fn refresh_overview(&mut self, ctx: &StoreContext) -> Result<(), ConfigError> {
        let Some(handle) = self.reply.clone() else {
            return Ok(());
        };
        let message = self.overview_message(ctx).await?;
        let updated = self.transport.edit(&handle, &message).await?;
        self.reply = Some(updated);
        Ok(())
    }

    /// Build the overview embed plus the drill-down selector from the
    /// current stored values.
    async fn overview_message(&self, ctx: &StoreContext) -> Result<OutboundMessage, ConfigError> {
        let columns = self.manifest.columns();
        let stored = self.store.read(ctx, &columns).await?;

        let mut description = String::new();
        for option in self.manifest.options() {
            let value =
                option.decode(stored.get(option.column()).cloned().unwrap_or(Value::Null));
            description.push_str(&format!(
                "**{}** — {}\n*{}*\n\n",
                option.name(),
                format_value(option.kind(), &value),
                option.description()
            ));
        }

        let choices = self
            .manifest
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| {
                SelectChoice::new(
                    format!("{}. {}", index + 1, option.name()),
                    option.custom_id(None),
                )
            })
            .collect();

        Ok(OutboundMessage {
            content: Some("Select which configuration option you want to view/edit:".to_string()),
            embed: Some(Embed {
                title: Some("Configuration".to_string()),
                description: description.trim_end().to_string(),
                color: Some(EMBED_COLOR),
            }),
            components: vec![Component::StringSelect {
                custom_id: MAIN_MENU_ID.to_string(),
                placeholder: Some("Select a configuration option".to_string()),
                choices,
            }],
            ephemeral: false,
        })
    }

    fn store_context(&self, scope: &EventScope) -> StoreContext {
        StoreContext {
            table: self.manifest.table().to_string(),
            selector: (self.selector)(scope),
        }
    }
}

impl<S, T> std::fmt::Debug for ConfigSession<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSession")
            .field("table", &self.manifest.table())
            .field("active", &self.reply.is_some())
            .field("initialized", &self.initialized)
            .finish()
    }
}
