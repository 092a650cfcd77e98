//! WebView event types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the panel WebView.
#[derive(Debug, Clone)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// Document title changed.
    TitleChanged { title: String },
    /// A bridge request was posted from JavaScript.
    IpcMessage { body: String },
    /// A navigation passed the allowlist.
    NavigationRequested { url: String },
    /// An export download was accepted and is being written to `path`.
    DownloadStarted { url: String, path: PathBuf },
    /// A download finished. `path` is `None` when the platform did not report one.
    DownloadCompleted {
        url: String,
        path: Option<PathBuf>,
        success: bool,
    },
    /// WebView was closed / destroyed.
    Closed,
}
