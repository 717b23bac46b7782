use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the shell around the scoring core.
///
/// Rule failures are never errors; they are modeled as `Violation`s.
#[derive(Error, Debug)]
pub enum CoachError {
    /// Underlying IO failure while reading or writing a store or rule file.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed JSON in a history or rule file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown trading session '{0}' (expected ASIA, LONDON or NY)")]
    UnknownSession(String),

    #[error("Unknown trade direction '{0}' (expected LONG or SHORT)")]
    UnknownDirection(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoachError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoachError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoachError>;
