//! Error types for overlay-document

use std::path::PathBuf;

/// Result type for overlay-document operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading overlay documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error("Unknown tag: !{tag}")]
    UnknownTag { tag: String },

    #[error("Overlay file not found: {path}")]
    OverlayNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }
}
