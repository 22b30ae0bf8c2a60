//! Error types for editor, display and terminal operations.
//!
//! Out-of-range cursor moves and deletes at column 0 are not errors: they are
//! silent no-ops on the buffer. Errors only come from the outside world.

use thiserror::Error;

/// Errors that can occur while driving the editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading input or writing to the display failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup or teardown failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Feature not available on this platform.
    #[error("Feature '{feature}' not supported on platform '{platform}'")]
    Unsupported { feature: String, platform: String },
}

impl EditorError {
    /// Create a terminal error.
    pub fn terminal(msg: &str) -> Self {
        EditorError::Terminal(msg.to_string())
    }

    /// Create an unsupported feature error for the current platform.
    pub fn unsupported(feature: &str) -> Self {
        EditorError::Unsupported {
            feature: feature.to_string(),
            platform: std::env::consts::OS.to_string(),
        }
    }
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
