use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::photo::PhotoAttachment;

static STUDENT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}[0-9]{3,6}$").unwrap());

/// A registered student. The id is assigned by the directory on insert,
/// monotonically increasing, never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i64,
    pub full_name: String,
    pub student_code: String,
    pub class_name: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoAttachment>,
    pub registered_at: DateTime<Utc>,
}

/// Registration request: a record without an id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StudentDraft {
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,
    #[validate(custom(function = validate_student_code))]
    pub student_code: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub photo: Option<PhotoAttachment>,
}

impl StudentDraft {
    /// Full registration-form validation: field rules plus the photo
    /// requirement the form enforces before submitting.
    pub fn validate_for_registration(&self) -> Result<(), crate::AppError> {
        self.validate()?;
        if self.photo.is_none() {
            return Err(crate::AppError::InvalidInput(
                "Please capture a photo".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update: only fields that are `Some` overwrite the stored record.
///
/// `photo` is doubly optional to distinguish "no change" from "clear the
/// photo".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub student_code: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub photo: Option<Option<PhotoAttachment>>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.student_code.is_none()
            && self.class_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.photo.is_none()
    }

    /// Merge this update into `record`, overwriting only present fields.
    pub fn apply_to(&self, record: &mut StudentRecord) {
        if let Some(full_name) = &self.full_name {
            record.full_name = full_name.clone();
        }
        if let Some(student_code) = &self.student_code {
            record.student_code = student_code.clone();
        }
        if let Some(class_name) = &self.class_name {
            record.class_name = class_name.clone();
        }
        if let Some(phone) = &self.phone {
            record.phone = phone.clone();
        }
        if let Some(address) = &self.address {
            record.address = address.clone();
        }
        if let Some(photo) = &self.photo {
            record.photo = photo.clone();
        }
    }
}

fn validate_student_code(code: &str) -> Result<(), ValidationError> {
    if STUDENT_CODE_RE.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::new("student_code")
            .with_message("Student code must look like STU001".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> StudentDraft {
        StudentDraft {
            full_name: "Alice Johnson".to_string(),
            student_code: "STU001".to_string(),
            class_name: "Class A".to_string(),
            phone: "555-0101".to_string(),
            address: "123 Main St".to_string(),
            photo: Some(PhotoAttachment::new(
                "data:image/jpeg;base64,AAAA".to_string(),
            )),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate_for_registration().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut d = draft();
        d.full_name = String::new();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_bad_student_code_rejected() {
        let mut d = draft();
        d.student_code = "stu-1".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_missing_photo_rejected_for_registration() {
        let mut d = draft();
        d.photo = None;
        assert!(d.validate().is_ok());
        assert!(d.validate_for_registration().is_err());
    }

    #[test]
    fn test_update_merges_only_present_fields() {
        let mut record = StudentRecord {
            id: 1,
            full_name: "Alice Johnson".to_string(),
            student_code: "STU001".to_string(),
            class_name: "Class A".to_string(),
            phone: "555-0101".to_string(),
            address: "123 Main St".to_string(),
            photo: None,
            registered_at: Utc::now(),
        };

        let update = StudentUpdate {
            phone: Some("555-9999".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut record);

        assert_eq!(record.phone, "555-9999");
        assert_eq!(record.full_name, "Alice Johnson");
        assert_eq!(record.class_name, "Class A");
    }

    #[test]
    fn test_update_can_clear_photo() {
        let mut record = StudentRecord {
            id: 1,
            full_name: "Alice Johnson".to_string(),
            student_code: "STU001".to_string(),
            class_name: "Class A".to_string(),
            phone: "555-0101".to_string(),
            address: "123 Main St".to_string(),
            photo: Some(PhotoAttachment::new(
                "data:image/jpeg;base64,AAAA".to_string(),
            )),
            registered_at: Utc::now(),
        };

        let update = StudentUpdate {
            photo: Some(None),
            ..Default::default()
        };
        update.apply_to(&mut record);
        assert!(record.photo.is_none());
    }

    #[test]
    fn test_empty_update_is_empty() {
        assert!(StudentUpdate::default().is_empty());
    }
}
