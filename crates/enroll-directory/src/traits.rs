//! Directory trait.
//!
//! An explicit async request/response interface returning typed
//! result-or-error; callers receive snapshots, never references into the
//! store.

use async_trait::async_trait;

use enroll_core::{AppError, StudentDraft, StudentRecord, StudentUpdate};

#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Insert a new record, assigning the next sequential id.
    async fn add(&self, draft: StudentDraft) -> Result<StudentRecord, AppError>;

    /// Snapshot of all records in insertion order.
    async fn list(&self) -> Result<Vec<StudentRecord>, AppError>;

    /// Fetch one record by id.
    async fn get(&self, id: i64) -> Result<StudentRecord, AppError>;

    /// Merge the present fields of `update` into the record, returning the
    /// merged result. A missing id leaves the store unchanged.
    async fn update(&self, id: i64, update: StudentUpdate) -> Result<StudentRecord, AppError>;

    /// Delete a record. The freed id is never reused.
    async fn remove(&self, id: i64) -> Result<(), AppError>;
}
