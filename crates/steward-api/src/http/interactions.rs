//! Interactions webhook handler.
//!
//! Receives platform interaction payloads, verifies the HMAC-SHA256
//! signature over the raw body, and either dispatches a command to its
//! feature handler or publishes the decoded event into the interaction
//! hub for a waiting session collector.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use steward_types::interaction::{
    CommandTrigger, ComponentEvent, Interaction, ModalSubmitEvent,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::commands;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded HMAC-SHA256 body signature.
const SIGNATURE_HEADER: &str = "x-signature-sha256";

/// Inbound interaction payload. Decodes straight into the domain event
/// types from steward-types.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundPayload {
    Command(CommandTrigger),
    Component(ComponentEvent),
    ModalSubmit(ModalSubmitEvent),
}

/// Signature verification failure.
#[derive(Debug, thiserror::Error)]
#[error("interaction signature verification failed")]
pub struct SignatureError;

/// POST /interactions - receive one platform interaction.
pub async fn receive_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let request_id = Uuid::now_v7();

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    verify_signature(
        state.config.interaction_secret.as_bytes(),
        &body,
        signature,
    )
    .map_err(|_| {
        warn!(%request_id, "rejected interaction with bad signature");
        StatusCode::UNAUTHORIZED
    })?;

    let payload: InboundPayload = serde_json::from_slice(&body).map_err(|err| {
        warn!(%request_id, %err, "unparseable interaction payload");
        StatusCode::BAD_REQUEST
    })?;

    match payload {
        InboundPayload::Command(trigger) => {
            debug!(%request_id, command = %trigger.command, "dispatching command");
            commands::dispatch(state, trigger);
        }
        InboundPayload::Component(event) => {
            debug!(%request_id, custom_id = %event.custom_id, "component interaction");
            state.hub.publish(Interaction::Component(event));
        }
        InboundPayload::ModalSubmit(event) => {
            debug!(%request_id, custom_id = %event.custom_id, "modal submission");
            state.hub.publish(Interaction::ModalSubmit(event));
        }
    }

    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Verify an HMAC-SHA256 signature against the raw request body.
///
/// Accepts an optional `sha256=` prefix; comparison is constant-time
/// via the hmac crate's `verify_slice`.
pub fn verify_signature(
    secret: &[u8],
    body: &[u8],
    signature_hex: &str,
) -> Result<(), SignatureError> {
    let hex = signature_hex
        .strip_prefix("sha256=")
        .unwrap_or(signature_hex);
    let expected = hex_decode(hex).map_err(|_| SignatureError)?;

    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignatureError)?;
    mac.update(body);
    mac.verify_slice(&expected).map_err(|_| SignatureError)
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Result<Vec<u8>, ()> {
    if hex.len() % 2 != 0 {
        return Err(());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ()))
        .collect()
}
