use std::path::PathBuf;

use rpa_common::PlatformError;

pub const APP_NAME: &str = "rpa-panel";

/// File name of the persisted settings document.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Returns the platform-specific configuration directory for the app.
///
/// - macOS: `~/Library/Application Support/rpa-panel`
/// - Linux: `$XDG_CONFIG_HOME/rpa-panel` (defaults to `~/.config/rpa-panel`)
/// - Windows: `%APPDATA%\rpa-panel`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the settings document, `config_dir()/settings.json`.
pub fn settings_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join(SETTINGS_FILE_NAME))
}

/// Returns the directory user-initiated exports are written to.
///
/// Falls back to the home directory when the platform has no download
/// directory.
pub fn download_dir() -> Result<PathBuf, PlatformError> {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| PlatformError::PathError("could not determine download directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_app_name() {
        if let Ok(path) = config_dir() {
            assert!(
                path.ends_with("rpa-panel"),
                "config_dir should end with 'rpa-panel', got: {path:?}"
            );
        }
    }

    #[test]
    fn settings_file_has_correct_name() {
        if let Ok(path) = settings_file() {
            assert_eq!(path.file_name().unwrap().to_str().unwrap(), "settings.json");
            assert!(path.parent().unwrap().ends_with("rpa-panel"));
        }
    }
}
