//! Settings persistence for the RPA testing panel.
//!
//! A single pretty-printed JSON document holds the user's preferences.
//! Every field has a default, so partial or damaged documents still load
//! into a complete [`Settings`] record.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rpa_config::SettingsStore;
//!
//! # async fn demo() {
//! let store = SettingsStore::at_default_location().expect("no config dir");
//! let mut settings = store.load().await;
//! settings.auto_save = true;
//! store.save(&settings).await.expect("failed to save settings");
//! # }
//! ```

pub mod merge;
pub mod paths;
pub mod schema;
pub mod store;
pub mod validation;

// Re-export core types for convenience
pub use merge::merge_over_defaults;
pub use schema::{AnimationSpeed, Settings, Theme};
pub use store::SettingsStore;

/// Serialize settings as pretty-printed JSON (two-space indent).
pub fn settings_to_json(settings: &Settings) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(settings)
}
