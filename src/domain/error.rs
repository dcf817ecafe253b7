use std::io;

use thiserror::Error;

/// Library-wide error type for deltas-setup operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The operator aborted an interactive prompt.
    #[error("Setup cancelled by operator")]
    Cancelled,

    /// Terminal interaction failed for a reason other than cancellation.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// External command failed or could not be spawned.
    #[error("Command '{command}' failed: {details}")]
    CommandFailed { command: String, details: String },

    /// Embedded template could not be loaded or rendered.
    #[error("Template '{name}' failed: {reason}")]
    Template { name: String, reason: String },

    /// Generated document could not be serialized.
    #[error("Failed to serialize {what}: {details}")]
    Serialization { what: String, details: String },
}

impl AppError {
    pub fn prompt_error<S: Into<String>>(message: S) -> Self {
        AppError::Prompt(message.into())
    }

    /// Whether this error represents a benign operator abort.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }
}
