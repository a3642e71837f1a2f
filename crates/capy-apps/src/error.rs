//! Error types for capy-apps

/// Launcher list errors
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("No launcher entry with id {0}")]
    UnknownEntry(String),

    #[error("Launcher entry {0} has no command")]
    EmptyCommand(String),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot move row {from} to {to} in a list of {len}")]
    InvalidMove { from: usize, to: usize, len: usize },

    #[error("Launcher service is not running")]
    ServiceUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}
