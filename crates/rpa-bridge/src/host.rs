//! Host side of the bridge: validates and dispatches UI requests.
//!
//! Every request is independent; nothing is remembered between calls.
//! Failures are turned into value-level results here so that no fault
//! ever crosses back into the UI.

use std::sync::Arc;

use rpa_common::{BridgeError, Event, EventBus};
use rpa_config::{Settings, SettingsStore};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::ipc::{IpcReply, IpcRequest};
use crate::protocol::{BridgeOp, ProcessResult, SaveResult};

/// One raw request in flight: the JSON body and where to send the reply.
pub type HostCall = (String, oneshot::Sender<Option<String>>);

/// Serves the three bridge operations against a [`SettingsStore`].
pub struct BridgeHost {
    store: SettingsStore,
    events: EventBus,
}

impl BridgeHost {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            store,
            events: EventBus::default(),
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// The push channel towards the UI.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Push an event to every UI subscriber. Returns the subscriber count.
    pub fn notify(&self, event: Event) -> usize {
        self.events.publish(event)
    }

    /// Handle one raw JSON request and encode the reply.
    ///
    /// Returns `None` when the body is not a well-formed request: without
    /// an id there is no caller to answer.
    pub async fn handle_raw(&self, body: &str) -> Option<String> {
        let request = match IpcRequest::from_json(body) {
            Some(r) => r,
            None => {
                warn!(body_len = body.len(), "bridge request rejected: failed to parse");
                return None;
            }
        };

        let reply = self.handle(request).await;
        match serde_json::to_string(&reply) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(id = reply.id, error = %e, "failed to encode bridge reply");
                None
            }
        }
    }

    /// Dispatch a parsed request.
    pub async fn handle(&self, request: IpcRequest) -> IpcReply {
        let IpcRequest { id, kind, payload } = request;

        let op = match BridgeOp::from_kind(&kind) {
            Some(op) => op,
            None => {
                warn!(id, kind = %kind, "bridge request rejected: unknown kind");
                return IpcReply::error(id, BridgeError::UnknownOperation(kind).to_string());
            }
        };

        debug!(id, kind = %kind, "bridge request dispatched");

        let result = match op {
            BridgeOp::SaveSettings => serde_json::to_value(self.save_settings(payload).await),
            BridgeOp::LoadSettings => serde_json::to_value(self.load_settings().await),
            BridgeOp::ProcessGroupData => {
                serde_json::to_value(self.process_group_data(payload).await)
            }
        };

        match result {
            Ok(value) => IpcReply::ok(id, value),
            Err(e) => IpcReply::error(id, format!("failed to encode {} result: {e}", op.as_str())),
        }
    }

    /// `saveSettings`: persist a full settings record.
    ///
    /// Absent fields take their defaults; a payload that is not a settings
    /// object, or holds invalid values, is refused without touching disk.
    pub async fn save_settings(&self, payload: Value) -> SaveResult {
        let settings: Settings = match serde_json::from_value(payload) {
            Ok(s) => s,
            Err(e) => {
                let err = BridgeError::InvalidPayload {
                    op: BridgeOp::SaveSettings.as_str().into(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "saveSettings refused");
                return SaveResult::failure(err.to_string());
            }
        };

        if let Err(e) = rpa_config::validation::validate(&settings) {
            warn!(error = %e, "saveSettings refused");
            return SaveResult::failure(e.to_string());
        }

        match self.store.save(&settings).await {
            Ok(()) => SaveResult::ok(),
            Err(e) => {
                warn!(path = %self.store.path().display(), error = %e, "failed to save settings");
                SaveResult::failure(e.to_string())
            }
        }
    }

    /// `loadSettings`: the effective record, defaults on any failure.
    pub async fn load_settings(&self) -> Settings {
        self.store.load().await
    }

    /// `processGroupData`: log the payload and echo it back.
    ///
    /// This is an acknowledgement only; nothing is stored and the payload
    /// is returned exactly as received, whatever its shape.
    pub async fn process_group_data(&self, payload: Value) -> ProcessResult {
        let group = payload
            .get("groupName")
            .and_then(Value::as_str)
            .unwrap_or("");
        let group_id = payload.get("groupId").and_then(Value::as_str).unwrap_or("");
        let values = payload
            .get("values")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        info!(group, group_id, values, "processing group data");
        ProcessResult::acknowledged(payload)
    }

    /// Serve raw requests until every sender is dropped.
    ///
    /// Each request runs as its own task so a slow file-system call never
    /// holds up the others.
    pub async fn serve(self: Arc<Self>, mut calls: mpsc::Receiver<HostCall>) {
        while let Some((body, reply_tx)) = calls.recv().await {
            let host = Arc::clone(&self);
            tokio::spawn(async move {
                let reply = host.handle_raw(&body).await;
                // The caller cannot cancel, but it may have gone away.
                let _ = reply_tx.send(reply);
            });
        }
        debug!("bridge host stopped: all clients disconnected");
    }
}

// =============================================================================
// TESTS
// =============================================================================
