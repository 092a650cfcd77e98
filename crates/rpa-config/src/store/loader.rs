//! Read the settings document from disk.

use std::path::Path;

use rpa_common::ConfigError;
use tracing::{debug, info, warn};

use crate::merge::merge_over_defaults;
use crate::schema::Settings;

/// Load settings from a specific JSON file.
///
/// A missing file is reported as [`ConfigError::FileNotFound`]; read and
/// parse failures as [`ConfigError::ParseError`]. A parsed document is
/// merged over the defaults.
pub async fn load_from_path(path: &Path) -> Result<Settings, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let document: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse JSON: {e}")))?;

    info!("loaded settings from {}", path.display());
    Ok(merge_over_defaults(document))
}

/// Load settings, substituting the defaults for any failure.
pub async fn load_or_default(path: &Path) -> Settings {
    match load_from_path(path).await {
        Ok(settings) => settings,
        Err(ConfigError::FileNotFound(_)) => {
            debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load settings, using defaults");
            Settings::default()
        }
    }
}
