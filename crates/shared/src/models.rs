//! Data models shared between the relay server and clients.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

/// Valid usernames are non-empty and limited to lowercase alphanumerics,
/// periods, underscores, and dashes.
pub fn validate_username(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_' || c == '-'
        })
}

/// A binary attachment carried inside a relayed message.
///
/// The payload travels base64-encoded so the whole message fits in one JSON
/// text frame. The relay never decodes it; `data` is opaque in transit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    pub name: String,
    pub mime: String,
    pub data: String,
}

impl FilePayload {
    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data: BASE64.encode(bytes),
        }
    }

    /// Decode the base64 payload back into raw bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, crate::error::PayloadError> {
        Ok(BASE64.decode(&self.data)?)
    }
}

// --- Identity Request/Response Types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUsernameRequest {
    pub username: String,
}

/// Outcome of a username check. `Available` doubles as the reservation
/// receipt: the name is durably claimed by the time the response is sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CheckUsernameResponse {
    Available { username: String },
    Taken { message: String, suggestion: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRecipientRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckRecipientResponse {
    pub exists: bool,
}
