//! Error types for SkinSnap
//!
//! Library code returns [`SkinError`]; the binary and the REPL wrap it in
//! `anyhow` with extra context.

use thiserror::Error;

/// Main error type for the questionnaire and classification pipeline
#[derive(Error, Debug)]
pub enum SkinError {
    /// Questionnaire received an event that does not belong to its stage
    #[error("Invalid stage transition from {from} on {event}: {reason}")]
    InvalidTransition {
        from: String,
        event: String,
        reason: String,
    },

    /// Upload rejected by the input boundary (wrong extension or encoding)
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// Bytes claimed to be JPEG/PNG but could not be decoded
    #[error("Image decode failed: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Tensor construction or model forward pass errors
    #[error("Tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// Classifier returned something unusable
    #[error("Inference error: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("SkinSnap error: {0}")]
    Generic(String),
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, SkinError>;

/// Convert anyhow errors to SkinError
impl From<anyhow::Error> for SkinError {
    fn from(err: anyhow::Error) -> Self {
        SkinError::Generic(err.to_string())
    }
}
