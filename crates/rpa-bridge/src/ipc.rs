//! Wire envelope shared by every bridge transport.
//!
//! Messages flow in both directions as JSON text:
//! - **UI -> Host**: `{"id": 7, "kind": "loadSettings", "payload": null}`
//! - **Host -> UI (reply)**: `{"id": 7, "ok": {...}}` or `{"id": 7, "error": "..."}`
//! - **Host -> UI (push)**: `{"channel": "element-event", "payload": {...}}`
//!
//! Operation failures travel inside `ok` as value-level results; `error`
//! is reserved for envelope rejections such as an unknown `kind`.

use serde::{Deserialize, Serialize};

/// A request from the UI side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcRequest {
    /// Correlates the reply with the pending call.
    pub id: u64,
    /// The operation name.
    pub kind: String,
    /// Operation input (arbitrary JSON, `null` when absent).
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl IpcRequest {
    pub fn new(id: u64, kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id,
            kind: kind.into(),
            payload,
        }
    }

    /// Parse a request from raw JSON text.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// The host's answer to one [`IpcRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcReply {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IpcReply {
    pub fn ok(id: u64, value: serde_json::Value) -> Self {
        Self {
            id,
            ok: Some(value),
            error: None,
        }
    }

    pub fn error(id: u64, error: impl Into<String>) -> Self {
        Self {
            id,
            ok: None,
            error: Some(error.into()),
        }
    }
}

/// An unsolicited host -> UI message on a named channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcPush {
    pub channel: String,
    pub payload: serde_json::Value,
}

impl From<&rpa_common::Event> for IpcPush {
    fn from(event: &rpa_common::Event) -> Self {
        Self {
            channel: event.channel().to_string(),
            payload: event.payload(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
