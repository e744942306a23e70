// ABOUTME: Error types for the lesson-slides application
// ABOUTME: Provides structured error handling for asset loading, rendering and serving

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Configuration error: icon not found: {0}")]
    IconNotFound(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Failed to decode image: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No lesson for week {0}")]
    UnknownLesson(u32),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("PDF generation error: {0}")]
    PdfError(String),

    #[error("HTTP server error: {0}")]
    ServerError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),
}

impl DeckError {
    /// HTTP status code reported to the client when a request fails with this error.
    pub fn status_code(&self) -> u16 {
        match self {
            DeckError::InvalidColor(_) | DeckError::InvalidRequest(_) => 400,
            DeckError::UnknownLesson(_) => 404,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
