//! Data models

pub mod photo;
pub mod student;

pub use photo::{PhotoAttachment, PhotoFormat, PhotoMetadata};
pub use student::{StudentDraft, StudentRecord, StudentUpdate};
