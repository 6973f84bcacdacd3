//! WebSocket relay protocol: envelope, client commands, server events.
//!
//! Every frame in either direction is a JSON-encoded [`WsEnvelope`] whose
//! `type`/`data` pair carries one command or event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::FilePayload;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsEnvelope<T> {
    pub id: String,
    #[serde(flatten)]
    pub payload: T,
    pub ts: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl<T> WsEnvelope<T> {
    pub fn new(payload: T) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            payload,
            ts: Utc::now(),
            correlation_id: None,
        }
    }

    /// Envelope produced in reaction to an inbound envelope, carrying its id.
    pub fn correlated(payload: T, inbound_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(inbound_id.into()),
            ..Self::new(payload)
        }
    }
}

/// Commands a client sends to the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientCommand {
    /// Bind this connection to a username. Idempotent overwrite, no response.
    Register { username: String },
    /// Relay a message to the receiver's current connection, if any.
    SendMessage {
        sender: String,
        receiver: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<FilePayload>,
    },
}

/// Events the relay pushes to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// A message relayed from `sender` to this connection.
    ReceiveMessage {
        sender: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<FilePayload>,
    },
}
