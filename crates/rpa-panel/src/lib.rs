//! UI-side model of the RPA testing panel.
//!
//! The panel lets a user build a mock form out of buttons, inputs, input
//! groups, text, radio/checkbox groups and dropdowns, and logs every
//! simulated interaction. Panel contents live only in memory; preferences
//! are read and written through a [`rpa_bridge::HostBridge`].

pub mod app;
pub mod controller;
pub mod element;
pub mod form;
pub mod interaction;
pub mod log;
pub mod modal;
pub mod panel;

pub use app::{PanelApp, Statistics};
pub use controller::PanelController;
pub use element::{ElementKind, ElementSpec, InputGroupSpec};
pub use form::FormData;
pub use interaction::Interaction;
pub use log::{EventLog, LogEntry};
pub use modal::{ModalOutcome, ModalPrompt, ModalResponder};
pub use panel::{Panel, PanelExport};
