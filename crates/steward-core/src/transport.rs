//! Outbound transport port.
//!
//! Everything the engine shows to a user goes through this trait.
//! Uses RPITIT (native async fn in traits, Rust 2024 edition).
//! The production implementation lives in steward-api; tests use an
//! in-memory fake.

use steward_types::component::{MessageHandle, Modal, OutboundMessage};
use steward_types::error::TransportError;
use steward_types::interaction::{CommandTrigger, ComponentEvent};

/// Port to the chat platform's message/modal surface.
pub trait Transport: Send + Sync {
    /// Reply to a command invocation. Returns a handle to the created
    /// message so the caller can edit it later.
    fn reply(
        &self,
        trigger: &CommandTrigger,
        message: &OutboundMessage,
    ) -> impl std::future::Future<Output = Result<MessageHandle, TransportError>> + Send;

    /// Edit a message the bot owns.
    fn edit(
        &self,
        handle: &MessageHandle,
        message: &OutboundMessage,
    ) -> impl std::future::Future<Output = Result<MessageHandle, TransportError>> + Send;

    /// Post a follow-up message under an interaction token.
    fn follow_up(
        &self,
        token: &str,
        message: &OutboundMessage,
    ) -> impl std::future::Future<Output = Result<MessageHandle, TransportError>> + Send;

    /// Open a modal dialog in response to a component interaction.
    fn open_modal(
        &self,
        event: &ComponentEvent,
        modal: &Modal,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;

    /// Silently acknowledge an interaction so the platform stops
    /// showing it as pending.
    fn acknowledge(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}
