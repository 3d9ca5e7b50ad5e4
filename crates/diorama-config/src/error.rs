//! Configuration error types.

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read from the session store.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write to the session store.
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to parse JSON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),

    /// Failed to serialize config to JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    /// No per-user config directory exists on this platform.
    #[error("no session directory available")]
    NoSessionDir,
}
