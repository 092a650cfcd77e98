use rpa_bridge::IpcPush;
use tracing::warn;
use wry::WebView;

use crate::ipc;

/// Handle to the panel WebView.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    /// Current URL (best-effort tracking).
    pub(super) current_url: String,
    pub(super) current_title: String,
}

impl WebViewHandle {
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    /// Update the tracked title.
    pub fn set_title(&mut self, title: String) {
        self.current_title = title;
    }

    /// Execute JavaScript in the WebView context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Deliver an encoded bridge reply to the page.
    ///
    /// Text that is not a reply envelope is dropped with a warning.
    pub fn resolve_reply(&self, raw: &str) -> Result<(), wry::Error> {
        match ipc::js_resolve_reply(raw) {
            Some(script) => self.webview.evaluate_script(&script),
            None => {
                warn!(len = raw.len(), "dropping malformed bridge reply");
                Ok(())
            }
        }
    }

    /// Deliver a push message to the page's channel listeners.
    pub fn push(&self, push: &IpcPush) -> Result<(), wry::Error> {
        self.webview.evaluate_script(&ipc::js_push(push))
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    /// Open devtools (if enabled).
    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }
}
