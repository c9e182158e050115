//! REST transport implementation.
//!
//! Implements the core `Transport` trait against the chat platform's
//! REST API with reqwest. Every message the engine renders leaves the
//! process through here.

use reqwest::Client;
use serde::Deserialize;
use steward_core::transport::Transport;
use steward_types::component::{MessageHandle, Modal, OutboundMessage};
use steward_types::error::TransportError;
use steward_types::ids::{ChannelId, MessageId};
use steward_types::interaction::{CommandTrigger, ComponentEvent};

/// Transport backed by the platform REST API.
pub struct RestTransport {
    client: Client,
    base_url: String,
    bot_token: String,
}

/// Response body for message create/edit calls.
#[derive(Debug, Deserialize)]
struct CreatedMessage {
    id: String,
    #[serde(default)]
    channel_id: Option<String>,
}

impl RestTransport {
    pub fn new(base_url: &str, bot_token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.bot_token)
    }

    async fn post_json<E>(
        &self,
        url: String,
        body: &impl serde::Serialize,
        err: impl Fn(String) -> E,
    ) -> Result<reqwest::Response, E> {
        self.client
            .post(url)
            .header("authorization", self.auth_header())
            .json(body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| err(e.to_string()))
    }
}

impl Transport for RestTransport {
    async fn reply(
        &self,
        trigger: &CommandTrigger,
        message: &OutboundMessage,
    ) -> Result<MessageHandle, TransportError> {
        let url = self.url(&format!("channels/{}/messages", trigger.channel_id));
        let response = self
            .post_json(url, message, TransportError::Send)
            .await?
            .json::<CreatedMessage>()
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;

        Ok(MessageHandle {
            channel_id: trigger.channel_id.clone(),
            message_id: MessageId::new(response.id),
            token: trigger.token.clone(),
        })
    }

    async fn edit(
        &self,
        handle: &MessageHandle,
        message: &OutboundMessage,
    ) -> Result<MessageHandle, TransportError> {
        let url = self.url(&format!(
            "channels/{}/messages/{}",
            handle.channel_id, handle.message_id
        ));
        self.client
            .patch(url)
            .header("authorization", self.auth_header())
            .json(message)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TransportError::Edit(e.to_string()))?;

        Ok(handle.clone())
    }

    async fn follow_up(
        &self,
        token: &str,
        message: &OutboundMessage,
    ) -> Result<MessageHandle, TransportError> {
        let url = self.url(&format!("interactions/{token}/follow-up"));
        let response = self
            .post_json(url, message, TransportError::FollowUp)
            .await?
            .json::<CreatedMessage>()
            .await
            .map_err(|e| TransportError::FollowUp(e.to_string()))?;

        Ok(MessageHandle {
            channel_id: ChannelId::new(response.channel_id.unwrap_or_default()),
            message_id: MessageId::new(response.id),
            token: token.to_string(),
        })
    }

    async fn open_modal(
        &self,
        event: &ComponentEvent,
        modal: &Modal,
    ) -> Result<(), TransportError> {
        let url = self.url(&format!("interactions/{}/modal", event.token));
        self.post_json(url, modal, TransportError::Modal).await?;
        Ok(())
    }

    async fn acknowledge(&self, token: &str) -> Result<(), TransportError> {
        let url = self.url(&format!("interactions/{token}/ack"));
        self.post_json(url, &serde_json::json!({}), TransportError::Send)
            .await?;
        Ok(())
    }
}
