//! Polling of WebView events, bridge replies and host pushes.

use std::time::Instant;

use rpa_webview::{PageLoadState, WebViewEvent};
use winit::event_loop::ActiveEventLoop;

use super::core::RpaApp;
use super::types::POLL_INTERVAL;

impl RpaApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
            self.poll_bridge_replies();
            self.poll_pushes();
        }

        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(
            Instant::now() + POLL_INTERVAL,
        ));
    }

    /// Drain and handle events from the panel WebView.
    pub(super) fn poll_webview_events(&mut self) {
        let events = match &self.webviews {
            Some(manager) => manager.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                WebViewEvent::IpcMessage { body } => self.handle_ipc_message(body),
                WebViewEvent::PageLoad { state, url } => match state {
                    PageLoadState::Started => tracing::debug!(url = %url, "Panel loading"),
                    PageLoadState::Finished => tracing::info!(url = %url, "Panel loaded"),
                },
                WebViewEvent::TitleChanged { title } => {
                    if let Some(ref w) = self.window {
                        w.set_title(&title);
                    }
                    if let Some(ref mut panel) = self.panel {
                        panel.set_title(title);
                    }
                }
                WebViewEvent::NavigationRequested { url } => {
                    tracing::debug!(url = %url, "Panel navigated");
                }
                WebViewEvent::DownloadStarted { path, .. } => {
                    tracing::info!(path = %path.display(), "Saving export");
                }
                WebViewEvent::DownloadCompleted { path, success, .. } => {
                    let path = path.map(|p| p.display().to_string()).unwrap_or_default();
                    if success {
                        tracing::info!(path = %path, "Export saved");
                    } else {
                        tracing::warn!(path = %path, "Export failed");
                    }
                }
                WebViewEvent::Closed => {
                    tracing::info!("Panel webview closed");
                    self.should_exit = true;
                }
            }
        }
    }

    /// Hand finished bridge replies back to the page.
    pub(super) fn poll_bridge_replies(&mut self) {
        while let Ok(reply) = self.reply_rx.try_recv() {
            match &self.panel {
                Some(panel) => {
                    if let Err(e) = panel.resolve_reply(&reply) {
                        tracing::warn!(error = %e, "Failed to deliver bridge reply");
                    }
                }
                None => tracing::debug!("Dropping bridge reply: no panel"),
            }
        }
    }

    /// Forward host pushes to the page.
    pub(super) fn poll_pushes(&mut self) {
        let Some(ref rx) = self.push_rx else {
            return;
        };
        while let Ok(push) = rx.try_recv() {
            if let Some(ref panel) = self.panel {
                if let Err(e) = panel.push(&push) {
                    tracing::warn!(channel = %push.channel, error = %e, "Failed to deliver push");
                }
            }
        }
    }
}
