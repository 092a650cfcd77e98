//! WebView shell for the RPA testing panel.
//!
//! Wraps the `wry` crate to provide:
//! - The panel WebView as a child of the host window
//! - The `panelAPI` bridge script and reply/push delivery
//! - An `rpa://` custom protocol serving the bundled panel assets
//! - Navigation and download restrictions

pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;

pub use content::ContentProvider;
pub use events::{PageLoadState, WebViewEvent};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
