//! Window creation, async runtime start-up and panel WebView setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rpa_bridge::IpcPush;
use rpa_common::Event;
use rpa_webview::{ContentProvider, WebViewConfig, WebViewManager};
use tokio::sync::broadcast::error::RecvError;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::bounds::panel_bounds;
use super::core::RpaApp;
use super::types::{ASSETS_DIR, PANEL_URL, WINDOW_SIZE, WINDOW_TITLE};

// =============================================================================
// ASSET LOCATION
// =============================================================================

/// Pick the assets directory: explicit override, then `./assets`, then
/// `assets` next to the executable.
pub fn resolve_assets_dir(override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }
    let cwd_assets = std::env::current_dir().unwrap_or_default().join(ASSETS_DIR);
    if cwd_assets.is_dir() {
        return cwd_assets;
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(ASSETS_DIR)))
        .filter(|dir| dir.is_dir())
        .unwrap_or(cwd_assets)
}

fn panel_page_exists(assets_dir: &Path) -> bool {
    assets_dir.join("panel").join("index.html").is_file()
}

// =============================================================================
// INITIALIZATION
// =============================================================================

impl RpaApp {
    /// Create the window, the runtime and the panel WebView.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        if !self.start_runtime() {
            return false;
        }

        self.initialize_webviews();
        self.window = Some(window);

        self.create_panel_webview()
    }

    /// Start the background runtime that serves bridge requests, and
    /// forward host pushes to the event loop.
    pub(super) fn start_runtime(&mut self) -> bool {
        if self.tokio_runtime.is_some() {
            return true;
        }

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("rpa-bridge")
            .enable_all()
            .build();

        match rt {
            Ok(rt) => {
                let (push_tx, push_rx) = std::sync::mpsc::channel();
                let mut events = self.host.events().subscribe();
                rt.spawn(async move {
                    loop {
                        match events.recv().await {
                            Ok(Event::Unknown) => {}
                            Ok(event) => {
                                if push_tx.send(IpcPush::from(&event)).is_err() {
                                    break;
                                }
                            }
                            Err(RecvError::Lagged(skipped)) => {
                                tracing::warn!(skipped, "Push forwarder lagged");
                            }
                            Err(RecvError::Closed) => break,
                        }
                    }
                });

                self.push_rx = Some(push_rx);
                self.tokio_runtime = Some(rt);
                tracing::info!("Bridge runtime started");
                true
            }
            Err(e) => {
                tracing::error!("Failed to start bridge runtime: {e}");
                false
            }
        }
    }

    /// Set up the WebView manager with the content provider for `rpa://`.
    fn initialize_webviews(&mut self) {
        if !panel_page_exists(&self.assets_dir) {
            tracing::warn!(
                path = %self.assets_dir.display(),
                "Panel page not found, the window will stay blank"
            );
        }

        let mut manager = WebViewManager::new();
        manager.set_content_provider(ContentProvider::new(&self.assets_dir));
        self.webviews = Some(manager);
        tracing::info!(
            assets_dir = %self.assets_dir.display(),
            "WebView manager initialized"
        );
    }

    /// Create the panel WebView filling the window.
    fn create_panel_webview(&mut self) -> bool {
        let (Some(window), Some(manager)) = (&self.window, &self.webviews) else {
            tracing::warn!("Cannot create panel webview: window or manager missing");
            return false;
        };

        let bounds = panel_bounds(window.inner_size(), window.scale_factor());
        let mut config = WebViewConfig::with_url(PANEL_URL);
        config.devtools = config.devtools || self.devtools;
        match rpa_config::paths::download_dir() {
            Ok(dir) => config = config.download_to(dir),
            Err(e) => tracing::warn!("Exports disabled: {e}"),
        }

        match manager.create(window.as_ref(), bounds, config) {
            Ok(handle) => {
                tracing::info!(url = PANEL_URL, "Panel WebView created");
                if self.devtools {
                    handle.open_devtools();
                }
                self.panel = Some(handle);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create panel webview");
                false
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
    use rpa_bridge::BridgeHost;
    use rpa_config::SettingsStore;

    #[test]
    fn assets_override_wins() {
        let dir = PathBuf::from("/somewhere/else");
        assert_eq!(resolve_assets_dir(Some(dir.clone())), dir);
    }

    #[test]
    fn panel_page_detection() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!panel_page_exists(dir.path()));
        std::fs::create_dir_all(dir.path().join("panel")).unwrap();
        std::fs::write(dir.path().join("panel").join("index.html"), "<html></html>").unwrap();
        assert!(panel_page_exists(dir.path()));
    }

    #[test]
    fn runtime_forwards_pushes() {
        let dir = tempfile::tempdir().unwrap();
        let host = BridgeHost::new(SettingsStore::new(dir.path().join("settings.json")));
        let mut app = RpaApp::new(host, dir.path().to_path_buf(), false);

        assert!(app.start_runtime());
        assert!(app.start_runtime(), "second start is a no-op");

        // The forwarder subscribes synchronously, so the push is not lost.
        app.host
            .notify(Event::ElementEvent(serde_json::json!({ "id": "element-3" })));
        let push = app
            .push_rx
            .as_ref()
            .unwrap()
            .recv_timeout(std::time::Duration::from_secs(2))
            .unwrap();
        assert_eq!(push.channel, "element-event");
        assert_eq!(push.payload["id"], "element-3");

        app.shutdown();
    }
}
