//! Error types for the transport layer and the rest of the core crate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate-level [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Failure while sending a chat message to the remote endpoint
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Refusing to send an empty message")]
    EmptyMessage,

    #[error("Chat request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Chat endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Chat endpoint did not return JSON (content-type: {content_type:?})")]
    NotJson { content_type: Option<String> },

    #[error("Could not parse chat response: {0}")]
    Parse(#[source] serde_json::Error),
}

impl TransportError {
    /// HTTP status passthrough, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status(code) => Some(*code),
            TransportError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failure while uploading an image for analysis
#[derive(Debug, Error)]
pub enum ImageAnalysisError {
    #[error("Image file is empty")]
    EmptyFile,

    #[error("Invalid image MIME type: {0}")]
    InvalidMimeType(String),

    #[error("Image analysis request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Image analysis endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Image analysis endpoint did not return JSON (content-type: {content_type:?})")]
    NotJson { content_type: Option<String> },

    #[error("Could not parse image analysis response: {0}")]
    Parse(#[source] serde_json::Error),
}

impl ImageAnalysisError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ImageAnalysisError::Status(code) => Some(*code),
            ImageAnalysisError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Crate-level errors (configuration, filesystem, logging)
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration in {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
