//! Error types for contractdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for contractdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The primary color is not a 6-digit hex string.
    #[error("Invalid color format: '{0}' (expected #RRGGBB or RRGGBB)")]
    InvalidColorFormat(String),

    /// No text was provided.
    #[error("No text provided")]
    EmptyInput,

    /// The logo is not in an image format the renderer can embed.
    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    /// Failure reported by a rendering backend.
    #[error("Rendering error: {0}")]
    Renderer(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check if this error came from a rendering backend.
    pub fn is_renderer_failure(&self) -> bool {
        matches!(self, Error::Renderer(_) | Error::UnsupportedImage(_))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Renderer(format!("DOCX packaging failed: {}", err)),
        }
    }
}
