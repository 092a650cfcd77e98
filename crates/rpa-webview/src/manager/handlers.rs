use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Allowed URL prefixes for webview navigation.
///
/// The panel is fully self-contained; everything else is blocked.
/// - `rpa://` for the bundled panel assets
/// - `about:blank` for the default empty page
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "rpa://",
    // On Windows, WebView2 rewrites custom protocols: rpa://localhost/… → http://rpa.localhost/…
    "http://rpa.localhost",
    "about:blank",
];

/// Check whether a URL is allowed by the navigation allowlist.
pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// DOWNLOADS
// =============================================================================

/// Only exports generated in the page may be downloaded.
pub fn is_download_allowed(url: &str) -> bool {
    url.starts_with("blob:") || url.starts_with("data:")
}

/// Where a download suggested as `suggested` should land inside `dir`.
///
/// Only the final file name component is kept, so the page cannot direct
/// a write outside the download directory.
pub fn download_destination(dir: &Path, suggested: &Path) -> Option<PathBuf> {
    let name = suggested.file_name()?;
    if name == ".." || name == "." {
        return None;
    }
    Some(dir.join(name))
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            // Validate that the IPC body is valid JSON before forwarding
            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
                return;
            }

            debug!(body_len = body.len(), "IPC message from JS");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::IpcMessage { body });
            }
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::PageLoad { state, url });
            }
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(title = %title, "title changed");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::TitleChanged { title });
            }
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !is_navigation_allowed(&url) {
                warn!(url = %url, "navigation blocked: URL not in allowlist");
                return false;
            }

            debug!(url = %url, "navigation allowed");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::NavigationRequested { url });
            }
            true
        })
    }

    pub(super) fn attach_download_handlers<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        download_dir: Option<PathBuf>,
    ) -> WebViewBuilder<'a> {
        let started_events = Arc::clone(&events);
        builder
            .with_download_started_handler(move |url, path| {
                let Some(dir) = download_dir.as_deref() else {
                    warn!(url = %url, "download blocked: no download directory");
                    return false;
                };
                if !is_download_allowed(&url) {
                    warn!(url = %url, "download blocked: not a page export");
                    return false;
                }
                let Some(dest) = download_destination(dir, path) else {
                    warn!(suggested = %path.display(), "download blocked: bad file name");
                    return false;
                };

                info!(path = %dest.display(), "export download started");
                *path = dest.clone();
                if let Ok(mut evts) = started_events.lock() {
                    evts.push(WebViewEvent::DownloadStarted { url, path: dest });
                }
                true
            })
            .with_download_completed_handler(move |url, path, success| {
                if success {
                    info!(url = %url, "export download completed");
                } else {
                    warn!(url = %url, "export download failed");
                }
                if let Ok(mut evts) = events.lock() {
                    evts.push(WebViewEvent::DownloadCompleted { url, path, success });
                }
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -- Navigation --

    #[test]
    fn allows_rpa_protocol() {
        assert!(is_navigation_allowed("rpa://localhost/panel/index.html"));
        assert!(is_navigation_allowed("rpa://localhost/panel/panel.js"));
    }

    #[test]
    fn allows_about_blank() {
        assert!(is_navigation_allowed("about:blank"));
    }

    #[test]
    fn allows_webview2_rewritten_custom_protocol() {
        // WebView2 on Windows rewrites rpa://localhost/… → http://rpa.localhost/…
        assert!(is_navigation_allowed("http://rpa.localhost/panel/index.html"));
    }

    #[test]
    fn blocks_remote_origins() {
        assert!(!is_navigation_allowed("https://example.com"));
        assert!(!is_navigation_allowed("http://localhost:8080"));
        assert!(!is_navigation_allowed("https://cdn.jsdelivr.net/npm/x.js"));
    }

    #[test]
    fn blocks_file_and_script_protocols() {
        assert!(!is_navigation_allowed("file:///etc/passwd"));
        assert!(!is_navigation_allowed("javascript:alert(1)"));
        assert!(!is_navigation_allowed("data:text/html,<h1>XSS</h1>"));
    }

    #[test]
    fn blocks_empty_and_garbage() {
        assert!(!is_navigation_allowed(""));
        assert!(!is_navigation_allowed("not-a-url"));
        assert!(!is_navigation_allowed("ftp://files.example.com"));
    }

    #[test]
    fn allowlist_has_expected_entries() {
        assert_eq!(ALLOWED_NAV_PREFIXES.len(), 3);
        assert!(ALLOWED_NAV_PREFIXES.contains(&"rpa://"));
    }

    // -- Downloads --

    #[test]
    fn only_page_exports_download() {
        assert!(is_download_allowed("blob:rpa://localhost/1234-abcd"));
        assert!(is_download_allowed("data:application/json,{}"));
        assert!(!is_download_allowed("https://example.com/payload.exe"));
        assert!(!is_download_allowed("file:///etc/passwd"));
    }

    #[test]
    fn destination_keeps_only_file_name() {
        let dir = Path::new("/home/user/Downloads");
        assert_eq!(
            download_destination(dir, Path::new("/tmp/rpa-test-log-2024.txt")),
            Some(dir.join("rpa-test-log-2024.txt"))
        );
        assert_eq!(
            download_destination(dir, Path::new("../../etc/evil.json")),
            Some(dir.join("evil.json"))
        );
    }

    #[test]
    fn destination_rejects_nameless_paths() {
        let dir = Path::new("/downloads");
        assert_eq!(download_destination(dir, Path::new("..")), None);
        assert_eq!(download_destination(dir, Path::new("/")), None);
        assert_eq!(download_destination(dir, Path::new("")), None);
    }
}
