//! Write settings to disk as pretty-printed JSON.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place, so a
//! crash mid-write leaves the previous document intact.

use std::path::Path;

use rpa_common::ConfigError;

use crate::schema::Settings;

/// Write settings to a specific path.
///
/// Creates parent directories if they don't exist.
pub async fn save_to_path(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    let json = crate::settings_to_json(settings)
        .map_err(|e| ConfigError::WriteError(format!("failed to serialize settings: {e}")))?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            ConfigError::WriteError(format!(
                "failed to create settings directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &json).await.map_err(|e| {
        ConfigError::WriteError(format!(
            "failed to write settings to {}: {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        // Rename can fail on Windows while the target is open elsewhere.
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        write_in_place(&json, path, &tmp_path).await?;
    }

    tracing::debug!(path = %path.display(), "settings saved to disk");
    Ok(())
}

/// Overwrite `path` directly, then drop the `.tmp` sibling left behind.
async fn write_in_place(json: &str, path: &Path, tmp_path: &Path) -> Result<(), ConfigError> {
    tokio::fs::write(path, json).await.map_err(|e| {
        ConfigError::WriteError(format!(
            "failed to write settings to {}: {e}",
            path.display()
        ))
    })?;

    if let Err(e) = tokio::fs::remove_file(tmp_path).await {
        tracing::warn!(path = %tmp_path.display(), "failed to remove temp settings file: {e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn in_place_write_removes_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, "{}").unwrap();

        write_in_place("{\"theme\":\"dark\"}", &path, &tmp_path)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"theme\":\"dark\"}");
        assert!(!tmp_path.exists());
    }

    #[tokio::test]
    async fn in_place_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("settings.json");
        let tmp_path = path.with_extension("json.tmp");

        let err = write_in_place("{}", &path, &tmp_path).await.unwrap_err();
        assert!(matches!(err, ConfigError::WriteError(_)));
    }

    #[tokio::test]
    async fn save_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        save_to_path(&Settings::default(), &path).await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
