//! Graceful shutdown: destroy the webview, stop the bridge runtime.

use std::time::Duration;

use super::core::RpaApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl RpaApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// The WebView goes first so the page cannot post requests into a
    /// runtime that is being torn down.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if self.panel.take().is_some() {
            if let Some(ref manager) = self.webviews {
                manager.mark_closed();
            }
        }
        self.webviews = None;

        self.push_rx = None;
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.window = None;
        self.should_exit = true;

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
