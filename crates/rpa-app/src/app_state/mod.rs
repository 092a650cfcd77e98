//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the panel WebView and the bridge host.

mod bounds;
mod core;
mod event_handler;
mod init;
mod ipc_dispatch;
mod polling;
mod shutdown;
mod types;

pub use core::RpaApp;
pub use init::resolve_assets_dir;
