use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Channel name of the host → UI element event push.
pub const ELEMENT_EVENT_CHANNEL: &str = "element-event";

/// Unsolicited host → UI notifications.
///
/// The host never emits these today; the channel exists so the UI side can
/// subscribe ahead of time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    ElementEvent(serde_json::Value),
    #[serde(other)]
    Unknown,
}

impl Event {
    /// The push channel this event is delivered on.
    pub fn channel(&self) -> &'static str {
        match self {
            Event::ElementEvent(_) => ELEMENT_EVENT_CHANNEL,
            Event::Unknown => "unknown",
        }
    }

    /// The value handed to listeners of [`Event::channel`].
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Event::ElementEvent(v) => v.clone(),
            Event::Unknown => serde_json::Value::Null,
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        tracing::trace!(channel = event.channel(), "publishing event");
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
