//! Process bridge between the sandboxed panel UI and the privileged host.
//!
//! The UI may reach exactly three host operations:
//! - `saveSettings(settings) -> { success, error? }`
//! - `loadSettings() -> Settings`
//! - `processGroupData(payload) -> { success, processed?, error? }`
//!
//! plus a push channel (`element-event`) the host may use to notify the UI.
//! Requests are JSON envelopes ([`IpcRequest`]); the host answers each with
//! an [`IpcReply`] carrying the same id.

pub mod client;
pub mod host;
pub mod ipc;
pub mod protocol;

pub use client::{BridgeClient, HostBridge};
pub use host::{BridgeHost, HostCall};
pub use ipc::{IpcPush, IpcReply, IpcRequest};
pub use protocol::{
    is_operation_allowed, BridgeOp, GroupActionPayload, GroupValue, ProcessResult, SaveResult,
    ALLOWED_OPERATIONS,
};
