//! Error types module
//!
//! All non-camera errors are unified under the `AppError` enum: directory
//! lookups, input validation, image processing and photo encoding. Camera
//! acquisition has its own taxonomy in `enroll-capture`.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Photo encoding error: {0}")]
    Encoding(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Fixed user-facing message for each error class, suitable for a
    /// blocking alert. Internal detail stays in the `Display` impl and the
    /// logs; the user sees only these strings.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Record not found. It may have been removed.",
            AppError::InvalidInput(_) => "Please check the form and try again.",
            AppError::ImageProcessing(_) => "Could not process the photo. Please retake it.",
            AppError::Encoding(_) => "The photo data is invalid or corrupted.",
            AppError::Internal(_) => "Something went wrong. Please try again.",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::ImageProcessing(err.to_string())
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::Encoding(format!("Base64 decoding error: {}", err))
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}
