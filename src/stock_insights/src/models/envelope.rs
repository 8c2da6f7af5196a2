//! The `{success, data, ...}` wrapper every API response comes in.

use serde::{Deserialize, Serialize};

/// Response envelope as sent by the API.
///
/// `data` stays generic so the same envelope serves the raw
/// (`serde_json::Value`) and the normalized payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    /// Whether the server answered from its short-lived cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    /// Number of records, only sent by the list endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Human-readable failure reason, only sent when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Absent on failures.
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn was_cached(&self) -> bool {
        self.cached.unwrap_or(false)
    }
}
