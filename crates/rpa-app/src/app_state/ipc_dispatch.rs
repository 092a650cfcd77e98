//! Bridge request dispatch from the panel WebView to the host.

use std::sync::Arc;

use rpa_bridge::{is_operation_allowed, IpcRequest};

use super::core::RpaApp;

impl RpaApp {
    /// Hand one request from the page to the bridge host.
    ///
    /// The request runs on the background runtime; its reply is picked up
    /// by [`RpaApp::poll_bridge_replies`].
    pub(super) fn handle_ipc_message(&mut self, body: String) {
        let Some(request) = IpcRequest::from_json(&body) else {
            tracing::warn!(body_len = body.len(), "IPC message rejected: failed to parse");
            return;
        };

        if !is_operation_allowed(&request.kind) {
            // Still answered, so the page's promise rejects instead of hanging.
            tracing::warn!(id = request.id, kind = %request.kind, "IPC message rejected: unknown kind");
        } else {
            tracing::debug!(id = request.id, kind = %request.kind, "IPC message dispatched");
        }

        let Some(ref rt) = self.tokio_runtime else {
            tracing::warn!(id = request.id, "Bridge runtime not running, request dropped");
            return;
        };

        let host = Arc::clone(&self.host);
        let reply_tx = self.reply_tx.clone();
        rt.spawn(async move {
            let reply = host.handle(request).await;
            match serde_json::to_string(&reply) {
                Ok(json) => {
                    // The event loop may already be gone.
                    let _ = reply_tx.send(json);
                }
                Err(e) => tracing::warn!(id = reply.id, error = %e, "Failed to encode reply"),
            }
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================
