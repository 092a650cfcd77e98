//! Typed operations and result records carried over the bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The operations the UI may invoke on the host. Nothing else is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeOp {
    SaveSettings,
    LoadSettings,
    ProcessGroupData,
}

/// Wire names of every [`BridgeOp`], in declaration order.
pub const ALLOWED_OPERATIONS: &[&str] = &["saveSettings", "loadSettings", "processGroupData"];

impl BridgeOp {
    /// Resolve a wire `kind`. Matching is exact and case-sensitive.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "saveSettings" => Some(BridgeOp::SaveSettings),
            "loadSettings" => Some(BridgeOp::LoadSettings),
            "processGroupData" => Some(BridgeOp::ProcessGroupData),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BridgeOp::SaveSettings => "saveSettings",
            BridgeOp::LoadSettings => "loadSettings",
            BridgeOp::ProcessGroupData => "processGroupData",
        }
    }
}

/// Check whether a wire `kind` names an allowed operation.
pub fn is_operation_allowed(kind: &str) -> bool {
    ALLOWED_OPERATIONS.contains(&kind)
}

/// Outcome of `saveSettings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// One input of an input group, by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupValue {
    pub index: u32,
    pub value: String,
}

/// Values collected when an input group's action button is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupActionPayload {
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub values: Vec<GroupValue>,
    /// RFC 3339 creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Outcome of `processGroupData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub success: bool,
    /// The request payload, exactly as received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessResult {
    /// Acknowledge a payload by echoing it back.
    pub fn acknowledged(payload: Value) -> Self {
        Self {
            success: true,
            processed: Some(payload),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            processed: None,
            error: Some(error.into()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
