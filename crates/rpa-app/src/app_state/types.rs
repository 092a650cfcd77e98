//! Internal constants for the app state module.

use std::time::Duration;

/// How often to poll WebView events and bridge replies (approx 60 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

pub(super) const WINDOW_TITLE: &str = "UI RPA Testing Panel";

/// Initial window size in logical pixels.
pub(super) const WINDOW_SIZE: (f64, f64) = (1200.0, 800.0);

/// Entry page of the bundled panel.
pub(super) const PANEL_URL: &str = "rpa://localhost/panel/index.html";

/// Directory name of the bundled assets, relative to the working
/// directory or the executable.
pub(super) const ASSETS_DIR: &str = "assets";
