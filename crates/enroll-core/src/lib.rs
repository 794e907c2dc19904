//! Core types for the enrollment kiosk: shared models, errors,
//! configuration and validation used by every other crate in the
//! workspace.

pub mod config;
pub mod error;
pub mod models;

pub use config::AppConfig;
pub use error::AppError;
pub use models::{
    PhotoAttachment, PhotoFormat, PhotoMetadata, StudentDraft, StudentRecord, StudentUpdate,
};
