//! WebView lifecycle management.
//!
//! `WebViewManager` builds the single panel `wry::WebView` and collects
//! its events for the host event loop.

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

/// Owns the event sink and content provider shared with WebView callbacks.
pub struct WebViewManager {
    /// Event sink; pushed from wry callbacks, drained by the event loop.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    /// Optional content provider for the `rpa://` custom protocol.
    content_provider: Option<Arc<ContentProvider>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            content_provider: None,
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    /// Record that the WebView was torn down.
    pub fn mark_closed(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.push(WebViewEvent::Closed);
        }
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_sink() {
        let manager = WebViewManager::new();
        manager
            .events
            .lock()
            .unwrap()
            .push(WebViewEvent::IpcMessage { body: "{}".into() });
        manager.mark_closed();

        let drained = manager.drain_events();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[1], WebViewEvent::Closed));
        assert!(manager.drain_events().is_empty());
    }
}
