use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("settings parse error: {0}")]
    ParseError(String),

    #[error("settings write error: {0}")]
    WriteError(String),

    #[error("settings validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("operation not allowed: {0}")]
    UnknownOperation(String),

    #[error("invalid payload for {op}: {reason}")]
    InvalidPayload { op: String, reason: String },

    #[error("malformed message: {0}")]
    Malformed(String),

    #[error("bridge disconnected")]
    Disconnected,
}

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("nothing to export")]
    NothingToExport,

    #[error("dialog cancelled")]
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum RpaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
