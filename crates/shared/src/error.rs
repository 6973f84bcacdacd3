//! Shared error types including RFC7807 Problem Details.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RFC7807 Problem Details (application/problem+json)
///
/// Canonical error envelope for `/api/*` endpoints so clients can surface
/// meaningful validation errors instead of failing to decode a success
/// response type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            type_url: "https://relaypad.dev/problems/bad-request".to_string(),
            title: "Bad Request".to_string(),
            status: 400,
            detail: Some(detail.into()),
        }
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self {
            type_url: "https://relaypad.dev/problems/internal-error".to_string(),
            title: "Internal Server Error".to_string(),
            status: 500,
            detail: Some(detail.into()),
        }
    }
}

/// Errors surfaced while handling a relayed payload on the client side.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid base64 file data: {0}")]
    InvalidData(#[from] base64::DecodeError),
}
