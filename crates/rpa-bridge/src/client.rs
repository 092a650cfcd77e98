//! UI side of the bridge.
//!
//! Every call is a non-blocking request/await: the request is encoded as
//! JSON text, handed to the host task, and the caller suspends until the
//! matching reply arrives. Only text crosses the channel, so values are
//! always copied and never shared.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rpa_common::{BridgeError, Event, EventBus, ELEMENT_EVENT_CHANNEL};
use rpa_config::{merge_over_defaults, Settings};
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::host::{BridgeHost, HostCall};
use crate::ipc::{IpcReply, IpcRequest};
use crate::protocol::{BridgeOp, GroupActionPayload, ProcessResult, SaveResult};

/// How many requests may queue for the host before callers wait.
const CALL_QUEUE_DEPTH: usize = 64;

/// The operations the UI may ask of the host.
#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn save_settings(&self, settings: &Settings) -> SaveResult;

    async fn load_settings(&self) -> Settings;

    async fn process_group_data(&self, payload: &GroupActionPayload) -> ProcessResult;
}

/// A bridge client talking to an in-process [`BridgeHost`] task.
pub struct BridgeClient {
    calls: mpsc::Sender<HostCall>,
    next_id: AtomicU64,
    events: EventBus,
    listeners: Mutex<HashMap<String, Vec<JoinHandle<()>>>>,
}

impl BridgeClient {
    /// Spawn `host` on the current tokio runtime and connect to it.
    ///
    /// The host task stops once this client (and every clone of its
    /// sender) is dropped.
    pub fn connect(host: Arc<BridgeHost>) -> Self {
        let (tx, rx) = mpsc::channel(CALL_QUEUE_DEPTH);
        let events = host.events().clone();
        tokio::spawn(host.serve(rx));
        Self::from_parts(tx, events)
    }

    /// Build a client over an existing call channel and push bus.
    pub fn from_parts(calls: mpsc::Sender<HostCall>, events: EventBus) -> Self {
        Self {
            calls,
            next_id: AtomicU64::new(1),
            events,
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Send one request and wait for its reply value.
    pub async fn invoke(&self, op: BridgeOp, payload: Value) -> Result<Value, BridgeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = IpcRequest::new(id, op.as_str(), payload);
        let body =
            serde_json::to_string(&request).map_err(|e| BridgeError::Malformed(e.to_string()))?;

        let (reply_tx, reply_rx) = oneshot::channel();
        self.calls
            .send((body, reply_tx))
            .await
            .map_err(|_| BridgeError::Disconnected)?;

        let raw = reply_rx
            .await
            .map_err(|_| BridgeError::Disconnected)?
            .ok_or_else(|| BridgeError::Malformed(format!("no reply to request {id}")))?;

        let reply: IpcReply =
            serde_json::from_str(&raw).map_err(|e| BridgeError::Malformed(e.to_string()))?;
        if reply.id != id {
            return Err(BridgeError::Malformed(format!(
                "reply id {} does not match request {id}",
                reply.id
            )));
        }

        debug!(id, kind = op.as_str(), "bridge reply received");
        match (reply.ok, reply.error) {
            (Some(value), _) => Ok(value),
            (None, Some(error)) => Err(BridgeError::Malformed(error)),
            (None, None) => Err(BridgeError::Malformed(format!("empty reply to request {id}"))),
        }
    }

    /// Register a callback for host element events.
    pub fn on_element_event<F>(&self, callback: F)
    where
        F: Fn(Value) + Send + 'static,
    {
        let mut rx = self.events.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(Event::ElementEvent(payload)) => callback(payload),
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "element event listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        if let Ok(mut listeners) = self.listeners.lock() {
            listeners
                .entry(ELEMENT_EVENT_CHANNEL.to_string())
                .or_default()
                .push(handle);
        }
    }

    /// Drop every listener registered on `channel`. Returns how many were removed.
    pub fn remove_all_listeners(&self, channel: &str) -> usize {
        let removed = match self.listeners.lock() {
            Ok(mut listeners) => listeners.remove(channel).unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        for handle in &removed {
            handle.abort();
        }
        removed.len()
    }

    /// Number of live listeners on `channel`.
    pub fn listener_count(&self, channel: &str) -> usize {
        self.listeners
            .lock()
            .map(|l| l.get(channel).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl Drop for BridgeClient {
    fn drop(&mut self) {
        if let Ok(mut listeners) = self.listeners.lock() {
            for handle in listeners.drain().flat_map(|(_, handles)| handles) {
                handle.abort();
            }
        }
    }
}

#[async_trait]
impl HostBridge for BridgeClient {
    async fn save_settings(&self, settings: &Settings) -> SaveResult {
        let payload = match serde_json::to_value(settings) {
            Ok(v) => v,
            Err(e) => return SaveResult::failure(e.to_string()),
        };
        match self.invoke(BridgeOp::SaveSettings, payload).await {
            Ok(value) => serde_json::from_value(value)
                .unwrap_or_else(|e| SaveResult::failure(format!("unexpected reply: {e}"))),
            Err(e) => {
                warn!(error = %e, "saveSettings failed");
                SaveResult::failure(e.to_string())
            }
        }
    }

    async fn load_settings(&self) -> Settings {
        match self.invoke(BridgeOp::LoadSettings, Value::Null).await {
            Ok(value) => merge_over_defaults(value),
            Err(e) => {
                warn!(error = %e, "loadSettings failed, using defaults");
                Settings::default()
            }
        }
    }

    async fn process_group_data(&self, payload: &GroupActionPayload) -> ProcessResult {
        let value = match serde_json::to_value(payload) {
            Ok(v) => v,
            Err(e) => return ProcessResult::failure(e.to_string()),
        };
        match self.invoke(BridgeOp::ProcessGroupData, value).await {
            Ok(value) => serde_json::from_value(value)
                .unwrap_or_else(|e| ProcessResult::failure(format!("unexpected reply: {e}"))),
            Err(e) => {
                warn!(error = %e, "processGroupData failed");
                ProcessResult::failure(e.to_string())
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::GroupValue;
    use rpa_config::{SettingsStore, Theme};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tempfile::TempDir;

    fn connect_in(dir: &TempDir) -> (Arc<BridgeHost>, BridgeClient) {
        let host = Arc::new(BridgeHost::new(SettingsStore::new(
            dir.path().join("settings.json"),
        )));
        let client = BridgeClient::connect(Arc::clone(&host));
        (host, client)
    }

    #[tokio::test]
    async fn save_and_load_through_client() {
        let dir = TempDir::new().unwrap();
        let (_host, client) = connect_in(&dir);

        let settings = Settings {
            theme: Theme::Dark,
            panel_width: 1000,
            ..Default::default()
        };
        assert_eq!(client.save_settings(&settings).await, SaveResult::ok());
        assert_eq!(client.load_settings().await, settings);
    }

    #[tokio::test]
    async fn process_group_data_round_trip() {
        let dir = TempDir::new().unwrap();
        let (_host, client) = connect_in(&dir);
        let payload = GroupActionPayload {
            group_name: "G".into(),
            group_id: None,
            values: vec![GroupValue {
                index: 0,
                value: "x".into(),
            }],
            timestamp: None,
        };

        let result = client.process_group_data(&payload).await;
        assert!(result.success);
        assert_eq!(result.processed, Some(serde_json::to_value(&payload).unwrap()));
    }

    #[tokio::test]
    async fn interleaved_calls_all_complete() {
        let dir = TempDir::new().unwrap();
        let (_host, client) = connect_in(&dir);
        let client = Arc::new(client);

        let mut tasks = Vec::new();
        for i in 0..8u32 {
            let client = Arc::clone(&client);
            tasks.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    let s = Settings {
                        panel_width: 500 + i,
                        ..Default::default()
                    };
                    assert!(client.save_settings(&s).await.success);
                } else {
                    let loaded = client.load_settings().await;
                    assert!(loaded.panel_width == 800 || loaded.panel_width >= 500);
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
    }

    #[tokio::test]
    async fn disconnected_host_degrades_to_values() {
        let (tx, rx) = mpsc::channel::<HostCall>(1);
        drop(rx);
        let client = BridgeClient::from_parts(tx, EventBus::default());

        let err = client.invoke(BridgeOp::LoadSettings, Value::Null).await.unwrap_err();
        assert!(matches!(err, BridgeError::Disconnected));

        assert_eq!(client.load_settings().await, Settings::default());
        let saved = client.save_settings(&Settings::default()).await;
        assert!(!saved.success);
        assert_eq!(saved.error.as_deref(), Some("bridge disconnected"));
    }

    #[tokio::test]
    async fn element_event_listener_receives_pushes() {
        let dir = TempDir::new().unwrap();
        let (host, client) = connect_in(&dir);
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        client.on_element_event(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(client.listener_count(ELEMENT_EVENT_CHANNEL), 1);

        host.notify(Event::ElementEvent(serde_json::json!({ "id": "element-0" })));
        for _ in 0..50 {
            if hits.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remove_all_listeners_detaches_callbacks() {
        let dir = TempDir::new().unwrap();
        let (host, client) = connect_in(&dir);

        client.on_element_event(|_| {});
        client.on_element_event(|_| {});
        assert_eq!(client.remove_all_listeners(ELEMENT_EVENT_CHANNEL), 2);
        assert_eq!(client.listener_count(ELEMENT_EVENT_CHANNEL), 0);
        assert_eq!(client.remove_all_listeners("unused-channel"), 0);

        // Aborted listeners release their receivers.
        for _ in 0..50 {
            if host.events().subscriber_count() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(host.events().subscriber_count(), 0);
    }
}
