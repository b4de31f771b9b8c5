// Domain errors - Error taxonomy for the embed pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Which input a file-related error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Video,
    Subtitle,
    Output,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Video => write!(f, "video"),
            FileKind::Subtitle => write!(f, "subtitle"),
            FileKind::Output => write!(f, "output"),
        }
    }
}

/// Domain-specific error types
///
/// Every variant is terminal for the current invocation. Only
/// `ExternalToolFailure` and `Cancelled` can occur after the external
/// tool has been spawned.
#[derive(Error, Debug)]
pub enum DomainError {
    /// The media tool could not be resolved on the search path
    #[error("{tool} is not installed or not in PATH (install it from https://ffmpeg.org/download.html)")]
    ToolNotFound { tool: String },

    /// Video or subtitle input does not exist
    #[error("{kind} file not found: {}", path.display())]
    FileNotFound { kind: FileKind, path: PathBuf },

    /// Extension is not one of the recognised formats
    #[error("Unsupported {kind} format: {extension}")]
    UnsupportedFormat { kind: FileKind, extension: String },

    /// Subtitle argument does not follow `path[:lang[:title]]`
    #[error("Malformed subtitle argument '{token}': {reason}")]
    MalformedToken { token: String, reason: String },

    /// The same subtitle file was requested more than once
    #[error("Subtitle file given more than once: {}", path.display())]
    DuplicateSubtitle { path: PathBuf },

    /// Output would overwrite the input video
    #[error("Output path is the same as the input video: {}", path.display())]
    OutputCollision { path: PathBuf },

    /// The media tool ran and exited unsuccessfully
    #[error("{}", external_failure_message(*exit_code))]
    ExternalToolFailure {
        exit_code: Option<i32>,
        diagnostics: String,
    },

    /// Interrupted while waiting for the media tool
    #[error("Interrupted; the media tool was terminated")]
    Cancelled,

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn external_failure_message(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("Media tool failed with exit code {}", code),
        None => "Media tool was terminated by a signal".to_string(),
    }
}

impl DomainError {
    /// Captured diagnostic output, if the error came from the external tool
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            DomainError::ExternalToolFailure { diagnostics, .. } => Some(diagnostics.as_str()),
            _ => None,
        }
    }

    /// Build a malformed-token error
    pub fn malformed(token: &str, reason: impl Into<String>) -> Self {
        DomainError::MalformedToken {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = std::result::Result<T, DomainError>;
