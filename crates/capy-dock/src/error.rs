//! Error types for capy-dock

/// Dock client errors
#[derive(Debug, thiserror::Error)]
pub enum DockError {
    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    #[error("No tokio runtime to send dock requests from")]
    NoRuntime,
}
