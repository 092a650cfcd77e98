//! Host-side persistence of the settings document.

mod loader;
mod writer;


use std::path::{Path, PathBuf};

use rpa_common::{ConfigError, PlatformError};

use crate::paths;
use crate::schema::Settings;

pub use loader::{load_from_path, load_or_default};
pub use writer::save_to_path;

/// The single JSON settings document owned by the host process.
///
/// Cheap to clone; clones share nothing but the path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// A store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store at `<user-config-dir>/rpa-panel/settings.json`.
    pub fn at_default_location() -> Result<Self, PlatformError> {
        Ok(Self::new(paths::settings_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the effective settings. Never fails: a missing, unreadable or
    /// malformed file yields the defaults.
    pub async fn load(&self) -> Settings {
        load_or_default(&self.path).await
    }

    /// Overwrite the document with `settings`.
    pub async fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        save_to_path(settings, &self.path).await
    }
}
