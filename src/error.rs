//! Error types shared across generation, sequencing and presentation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FringeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid display interval: {0}")]
    InvalidTiming(String),
    #[error("Failed to present frame: {0}")]
    PresentationFailure(String),
    #[error("Invalid controller transition: {0}")]
    InvalidTransition(&'static str),
    #[error("Display setup failed: {0}")]
    Display(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FringeError>;
