//! In-memory directory.
//!
//! A `Vec` behind a tokio mutex plus a monotonic id counter. Each
//! operation runs to completion while holding the lock, so callers see
//! the same run-to-completion behavior a single-threaded UI loop gives.
//! Explicitly a stand-in for a real backend: no persistence, no partial
//! failure.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use enroll_core::{AppError, StudentDraft, StudentRecord, StudentUpdate};

use crate::traits::StudentDirectory;

struct Inner {
    students: Vec<StudentRecord>,
    next_id: i64,
}

pub struct InMemoryDirectory {
    inner: Mutex<Inner>,
}

impl InMemoryDirectory {
    /// An empty directory; the first assigned id is 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                students: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// A directory pre-populated with the two demo records (ids 1 and 2,
    /// next id 3).
    pub fn with_seed_data() -> Self {
        let now = Utc::now();
        let students = vec![
            StudentRecord {
                id: 1,
                full_name: "Alice Johnson".to_string(),
                student_code: "STU001".to_string(),
                class_name: "Class A".to_string(),
                phone: "555-0101".to_string(),
                address: "123 Main St".to_string(),
                photo: None,
                registered_at: now,
            },
            StudentRecord {
                id: 2,
                full_name: "Bob Smith".to_string(),
                student_code: "STU002".to_string(),
                class_name: "Class B".to_string(),
                phone: "555-0202".to_string(),
                address: "456 Oak Ave".to_string(),
                photo: None,
                registered_at: now,
            },
        ];
        Self {
            inner: Mutex::new(Inner {
                students,
                next_id: 3,
            }),
        }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentDirectory for InMemoryDirectory {
    async fn add(&self, draft: StudentDraft) -> Result<StudentRecord, AppError> {
        let mut inner = self.inner.lock().await;
        let record = StudentRecord {
            id: inner.next_id,
            full_name: draft.full_name,
            student_code: draft.student_code,
            class_name: draft.class_name,
            phone: draft.phone,
            address: draft.address,
            photo: draft.photo,
            registered_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.students.push(record.clone());
        tracing::info!(id = record.id, "student registered");
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<StudentRecord>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.students.clone())
    }

    async fn get(&self, id: i64) -> Result<StudentRecord, AppError> {
        let inner = self.inner.lock().await;
        inner
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("student {}", id)))
    }

    async fn update(&self, id: i64, update: StudentUpdate) -> Result<StudentRecord, AppError> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
        update.apply_to(record);
        tracing::info!(id, "student updated");
        Ok(record.clone())
    }

    async fn remove(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.inner.lock().await;
        let before = inner.students.len();
        inner.students.retain(|s| s.id != id);
        if inner.students.len() == before {
            return Err(AppError::NotFound(format!("student {}", id)));
        }
        tracing::info!(id, "student removed");
        Ok(())
    }
}
