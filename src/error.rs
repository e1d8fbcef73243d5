//! Error types for the neura chat stack.

/// Top-level error type for the voice chat system.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Chat backend request or response decoding error.
    #[error("backend error: {0}")]
    Backend(String),

    /// Speech engine or playback error.
    #[error("speech error: {0}")]
    Speech(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server error.
    #[error("server error: {0}")]
    Server(String),

    /// Channel send/receive error.
    #[error("channel error: {0}")]
    Channel(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ChatError>;
