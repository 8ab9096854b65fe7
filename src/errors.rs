// ABOUTME: Error types for the big-apple application
// ABOUTME: Separates fatal resource failures from the diagnostics the walker only logs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;
