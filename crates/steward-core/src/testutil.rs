//! In-memory fakes and event constructors for engine tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use serde_json::Value;
use steward_types::component::{MessageHandle, Modal, OutboundMessage};
use steward_types::error::{StoreError, TransportError};
use steward_types::ids::{ChannelId, GuildId, MessageId, UserId};
use steward_types::interaction::{
    CommandTrigger, ComponentAction, ComponentEvent, Interaction, ModalFieldValue,
    ModalSubmitEvent,
};
use tokio::sync::Notify;

use crate::config::{is_truthy, SettingsStore, StoreContext, WriteOp};
use crate::transport::Transport;

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

type RecordKey = (String, String, String);

/// In-memory `SettingsStore` keyed by (table, selector column, key).
///
/// Mirrors the SQLite adapter's semantics: read-miss and writes against
/// missing records fail with `NotFound`, and boolean toggles are stored
/// as integers.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<RecordKey, HashMap<String, Value>>>,
}

fn record_key(ctx: &StoreContext) -> RecordKey {
    (
        ctx.table.clone(),
        ctx.selector.column.clone(),
        ctx.selector.key.clone(),
    )
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record for the given context.
    pub fn insert(&self, ctx: &StoreContext, row: HashMap<String, Value>) {
        self.records.lock().unwrap().insert(record_key(ctx), row);
    }

    /// Current contents of a record, if present.
    pub fn snapshot(&self, ctx: &StoreContext) -> Option<HashMap<String, Value>> {
        self.records.lock().unwrap().get(&record_key(ctx)).cloned()
    }
}

impl SettingsStore for MemoryStore {
    async fn read(
        &self,
        ctx: &StoreContext,
        columns: &[String],
    ) -> Result<HashMap<String, Value>, StoreError> {
        let records = self.records.lock().unwrap();
        let row = records.get(&record_key(ctx)).ok_or(StoreError::NotFound)?;
        Ok(columns
            .iter()
            .map(|c| (c.clone(), row.get(c).cloned().unwrap_or(Value::Null)))
            .collect())
    }

    async fn write(
        &self,
        ctx: &StoreContext,
        column: &str,
        op: WriteOp,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let row = records
            .get_mut(&record_key(ctx))
            .ok_or(StoreError::NotFound)?;
        match op {
            WriteOp::Set(value) => {
                row.insert(column.to_string(), value);
            }
            WriteOp::ToggleBool => {
                let on = row.get(column).is_some_and(is_truthy);
                row.insert(column.to_string(), Value::from(if on { 0 } else { 1 }));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingTransport
// ---------------------------------------------------------------------------

/// `Transport` fake that records everything sent and hands out
/// sequential message ids.
#[derive(Default)]
pub struct RecordingTransport {
    counter: AtomicU64,
    fail_next_reply: AtomicBool,
    replies: Mutex<Vec<(OutboundMessage, MessageHandle)>>,
    edits: Mutex<Vec<(MessageHandle, OutboundMessage)>>,
    follow_ups: Mutex<Vec<(String, OutboundMessage, MessageHandle)>>,
    modals: Mutex<Vec<Modal>>,
    acks: Mutex<Vec<String>>,
    notify: Notify,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `reply` call fail with a send error.
    pub fn fail_next_reply(&self) {
        self.fail_next_reply.store(true, Ordering::SeqCst);
    }

    fn next_handle(&self, channel: &str, token: &str) -> MessageHandle {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        MessageHandle {
            channel_id: ChannelId::new(channel),
            message_id: MessageId::new(format!("msg-{n}")),
            token: token.to_string(),
        }
    }

    pub fn replies(&self) -> Vec<(OutboundMessage, MessageHandle)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<(MessageHandle, OutboundMessage)> {
        self.edits.lock().unwrap().clone()
    }

    /// (token, message) pairs of every follow-up, in send order.
    pub fn follow_ups(&self) -> Vec<(String, OutboundMessage)> {
        self.follow_ups
            .lock()
            .unwrap()
            .iter()
            .map(|(token, msg, _)| (token.clone(), msg.clone()))
            .collect()
    }

    pub fn modals(&self) -> Vec<Modal> {
        self.modals.lock().unwrap().clone()
    }

    pub fn acks(&self) -> Vec<String> {
        self.acks.lock().unwrap().clone()
    }

    async fn wait_until<V>(&self, check: impl Fn(&Self) -> Option<V>) -> V {
        loop {
            let notified = self.notify.notified();
            if let Some(value) = check(self) {
                return value;
            }
            notified.await;
        }
    }

    /// Wait until the first modal has been opened.
    pub async fn wait_for_modal(&self) -> Modal {
        self.wait_until(|t| t.modals.lock().unwrap().first().cloned())
            .await
    }

    /// Wait until the first follow-up exists and return its handle.
    pub async fn wait_for_follow_up(&self) -> MessageHandle {
        self.wait_for_follow_up_count(1).await
    }

    /// Wait until `n` follow-ups exist and return the handle of the nth.
    pub async fn wait_for_follow_up_count(&self, n: usize) -> MessageHandle {
        self.wait_until(|t| {
            let follow_ups = t.follow_ups.lock().unwrap();
            (follow_ups.len() >= n).then(|| follow_ups[n - 1].2.clone())
        })
        .await
    }

    /// Wait until a reply has been sent and return its handle.
    pub async fn wait_for_reply(&self) -> MessageHandle {
        self.wait_until(|t| t.replies.lock().unwrap().first().map(|(_, h)| h.clone()))
            .await
    }

    /// Wait until `n` edits of the owned message have happened.
    pub async fn wait_for_edit_count(&self, n: usize) {
        self.wait_until(|t| (t.edits.lock().unwrap().len() >= n).then_some(()))
            .await
    }
}

impl Transport for RecordingTransport {
    async fn reply(
        &self,
        trigger: &CommandTrigger,
        message: &OutboundMessage,
    ) -> Result<MessageHandle, TransportError> {
        if self.fail_next_reply.swap(false, Ordering::SeqCst) {
            self.notify.notify_waiters();
            return Err(TransportError::Send("connection reset".to_string()));
        }
        let handle = self.next_handle(trigger.channel_id.as_str(), &trigger.token);
        self.replies
            .lock()
            .unwrap()
            .push((message.clone(), handle.clone()));
        self.notify.notify_waiters();
        Ok(handle)
    }

    async fn edit(
        &self,
        handle: &MessageHandle,
        message: &OutboundMessage,
    ) -> Result<MessageHandle, TransportError> {
        self.edits
            .lock()
            .unwrap()
            .push((handle.clone(), message.clone()));
        self.notify.notify_waiters();
        Ok(handle.clone())
    }

    async fn follow_up(
        &self,
        token: &str,
        message: &OutboundMessage,
    ) -> Result<MessageHandle, TransportError> {
        let handle = self.next_handle("follow-up", token);
        self.follow_ups
            .lock()
            .unwrap()
            .push((token.to_string(), message.clone(), handle.clone()));
        self.notify.notify_waiters();
        Ok(handle)
    }

    async fn open_modal(
        &self,
        _event: &ComponentEvent,
        modal: &Modal,
    ) -> Result<(), TransportError> {
        self.modals.lock().unwrap().push(modal.clone());
        self.notify.notify_waiters();
        Ok(())
    }

    async fn acknowledge(&self, token: &str) -> Result<(), TransportError> {
        self.acks.lock().unwrap().push(token.to_string());
        self.notify.notify_waiters();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Event constructors
// ---------------------------------------------------------------------------

pub fn trigger(command: &str, guild: Option<&str>, user: &str) -> CommandTrigger {
    CommandTrigger {
        command: command.to_string(),
        guild_id: guild.map(GuildId::new),
        channel_id: ChannelId::new("chan-1"),
        user_id: UserId::new(user),
        token: "trigger-token".to_string(),
    }
}

pub fn click(custom_id: &str, user: &str, message: &str) -> Interaction {
    Interaction::Component(ComponentEvent {
        custom_id: custom_id.to_string(),
        guild_id: Some(GuildId::new("g1")),
        user_id: UserId::new(user),
        message_id: MessageId::new(message),
        action: ComponentAction::Button,
        token: format!("click-{custom_id}"),
    })
}

pub fn menu_select(value: &str, user: &str, message: &str) -> Interaction {
    Interaction::Component(ComponentEvent {
        custom_id: crate::config::MAIN_MENU_ID.to_string(),
        guild_id: Some(GuildId::new("g1")),
        user_id: UserId::new(user),
        message_id: MessageId::new(message),
        action: ComponentAction::StringSelect {
            values: vec![value.to_string()],
        },
        token: format!("menu-{value}"),
    })
}

pub fn picker_submit(
    custom_id: &str,
    action: ComponentAction,
    user: &str,
    message: &str,
) -> Interaction {
    Interaction::Component(ComponentEvent {
        custom_id: custom_id.to_string(),
        guild_id: Some(GuildId::new("g1")),
        user_id: UserId::new(user),
        message_id: MessageId::new(message),
        action,
        token: format!("pick-{custom_id}"),
    })
}

pub fn modal_submit(modal_id: &str, field_id: &str, value: &str, user: &str) -> Interaction {
    Interaction::ModalSubmit(ModalSubmitEvent {
        custom_id: modal_id.to_string(),
        guild_id: Some(GuildId::new("g1")),
        user_id: UserId::new(user),
        fields: vec![ModalFieldValue {
            custom_id: field_id.to_string(),
            value: value.to_string(),
        }],
        token: format!("modal-{modal_id}"),
    })
}
