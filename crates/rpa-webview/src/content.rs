//! Local content serving via custom protocol.
//!
//! Registers an `rpa://` custom protocol so the panel page and its
//! scripts load from the bundled assets directory without a local HTTP
//! server.

use std::path::{Path, PathBuf};

/// Custom protocol scheme for bundled assets.
pub const PROTOCOL_SCHEME: &str = "rpa";

/// Serves local files from a base directory via custom protocol.
///
/// A request for `rpa://localhost/panel/index.html` resolves to
/// `{base_dir}/panel/index.html` with the MIME type guessed from the
/// extension.
pub struct ContentProvider {
    base_dir: PathBuf,
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a request path to MIME type and content bytes.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, Vec<u8>)> {
        let clean = path.trim_start_matches('/');
        let file_path = self.base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape the base.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((mime_from_extension(&file_path), data))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Strip the scheme, host, query and fragment from an `rpa://` request URI.
///
/// WebView2 rewrites custom protocols to `http://rpa.localhost/...`, so
/// that form is accepted too.
pub fn request_path(uri: &str) -> &str {
    let path = uri
        .strip_prefix("rpa://localhost/")
        .or_else(|| uri.strip_prefix("rpa://localhost"))
        .or_else(|| uri.strip_prefix("http://rpa.localhost/"))
        .or_else(|| uri.strip_prefix("rpa:///"))
        .or_else(|| uri.strip_prefix("rpa://"))
        .unwrap_or("");
    match path.find(['?', '#']) {
        Some(end) => &path[..end],
        None => path,
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Path to the assets directory at the workspace root.
    fn assets_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent() // crates/
            .unwrap()
            .parent() // workspace root
            .unwrap()
            .join("assets")
    }

    // -----------------------------------------------------------------
    // Bundled panel
    // -----------------------------------------------------------------

    #[test]
    fn resolve_panel_page() {
        let cp = ContentProvider::new(assets_dir());
        let (mime, data) = cp.resolve("panel/index.html").expect("panel should resolve");
        assert_eq!(mime, "text/html");
        let html = String::from_utf8_lossy(&data);
        assert!(html.contains("ui-panel"));
        assert!(html.contains("event-log"));
    }

    #[test]
    fn resolve_panel_script_and_styles() {
        let cp = ContentProvider::new(assets_dir());
        let (mime, _) = cp.resolve("panel/panel.js").expect("script should resolve");
        assert_eq!(mime, "application/javascript");
        let (mime, _) = cp.resolve("panel/panel.css").expect("styles should resolve");
        assert_eq!(mime, "text/css");
    }

    #[test]
    fn panel_script_only_uses_panel_api() {
        let cp = ContentProvider::new(assets_dir());
        let (_, data) = cp.resolve("panel/panel.js").unwrap();
        let js = String::from_utf8_lossy(&data);
        assert!(js.contains("window.panelAPI"));
        assert!(!js.contains("window.ipc"), "page must go through panelAPI");
    }

    // -----------------------------------------------------------------
    // Security: directory traversal
    // -----------------------------------------------------------------

    #[test]
    fn traversal_with_dotdot_is_blocked() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("assets");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "secret").unwrap();

        let cp = ContentProvider::new(&base);
        assert!(cp.resolve("../secret.txt").is_none());
        assert!(cp.resolve("panel/../../secret.txt").is_none());
    }

    #[test]
    fn traversal_with_absolute_path_is_blocked() {
        let cp = ContentProvider::new(assets_dir());
        assert!(cp.resolve("/etc/passwd").is_none());
    }

    #[test]
    fn nonexistent_file_returns_none() {
        let cp = ContentProvider::new(assets_dir());
        assert!(cp.resolve("panel/does_not_exist.html").is_none());
    }

    #[test]
    fn resolve_with_leading_slash() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "hello").unwrap();
        let cp = ContentProvider::new(dir.path());

        let (mime, data) = cp.resolve("/a.txt").unwrap();
        assert_eq!(mime, "text/plain");
        assert_eq!(data, b"hello");
    }

    // -----------------------------------------------------------------
    // URI handling and MIME types
    // -----------------------------------------------------------------

    #[test]
    fn request_path_strips_scheme() {
        assert_eq!(request_path("rpa://localhost/panel/index.html"), "panel/index.html");
        assert_eq!(request_path("http://rpa.localhost/panel/panel.js"), "panel/panel.js");
        assert_eq!(request_path("rpa:///panel/panel.css"), "panel/panel.css");
        assert_eq!(request_path("https://example.com/x"), "");
    }

    #[test]
    fn request_path_drops_query_and_fragment() {
        assert_eq!(request_path("rpa://localhost/panel/panel.js?v=1"), "panel/panel.js");
        assert_eq!(request_path("rpa://localhost/panel/index.html#x"), "panel/index.html");
        assert_eq!(request_path("rpa://localhost/panel/panel.css?v=2#top"), "panel/panel.css");

        let cp = ContentProvider::new(assets_dir());
        let (mime, _) = cp
            .resolve(request_path("rpa://localhost/panel/panel.js?v=1"))
            .expect("versioned script should resolve");
        assert_eq!(mime, "application/javascript");
    }

    #[test]
    fn mime_types() {
        assert_eq!(mime_from_extension(Path::new("a.htm")), "text/html");
        assert_eq!(mime_from_extension(Path::new("a.mjs")), "application/javascript");
        assert_eq!(mime_from_extension(Path::new("a.xyz")), "application/octet-stream");
    }
}
