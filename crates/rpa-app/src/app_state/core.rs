//! RpaApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use rpa_bridge::{BridgeHost, IpcPush};
use rpa_webview::{WebViewHandle, WebViewManager};
use winit::window::Window;

/// Top-level application state.
pub struct RpaApp {
    /// Serves the panel's bridge requests.
    pub(super) host: Arc<BridgeHost>,
    pub(super) assets_dir: PathBuf,
    pub(super) devtools: bool,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // Panel WebView
    pub(super) webviews: Option<WebViewManager>,
    pub(super) panel: Option<WebViewHandle>,

    // Bridge requests run on this runtime; encoded replies come back
    // to the event loop through `reply_rx`.
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) reply_tx: mpsc::Sender<String>,
    pub(super) reply_rx: mpsc::Receiver<String>,
    pub(super) push_rx: Option<mpsc::Receiver<IpcPush>>,

    // Whether the app should exit
    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl RpaApp {
    pub fn new(host: BridgeHost, assets_dir: PathBuf, devtools: bool) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel();
        Self {
            host: Arc::new(host),
            assets_dir,
            devtools,
            window: None,
            webviews: None,
            panel: None,
            tokio_runtime: None,
            reply_tx,
            reply_rx,
            push_rx: None,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}
