use serde::{Deserialize, Serialize};

/// Encoded image format, as declared by a data URI header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoFormat {
    Jpeg,
    Png,
}

impl PhotoFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Some(PhotoFormat::Jpeg),
            "png" => Some(PhotoFormat::Png),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "jpeg",
            PhotoFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "image/jpeg",
            PhotoFormat::Png => "image/png",
        }
    }
}

/// Metadata derived by inspecting an already-encoded photo.
///
/// Derived, not authoritative: it must be recomputed whenever the encoded
/// bytes change. `quality` in particular is a bytes-per-pixel estimate, not
/// the encoder's actual quality parameter, and is display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
    /// Estimated quality percent (0-100), best-effort.
    pub quality: u8,
    pub format: PhotoFormat,
}

/// An encoded photo embedded in a student record.
///
/// `metadata` is `None` when unknown or stale; callers re-derive it after
/// replacing `data_uri`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoAttachment {
    pub data_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PhotoMetadata>,
}

impl PhotoAttachment {
    pub fn new(data_uri: String) -> Self {
        Self {
            data_uri,
            metadata: None,
        }
    }

    pub fn with_metadata(data_uri: String, metadata: PhotoMetadata) -> Self {
        Self {
            data_uri,
            metadata: Some(metadata),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(PhotoFormat::parse("jpeg"), Some(PhotoFormat::Jpeg));
        assert_eq!(PhotoFormat::parse("JPG"), Some(PhotoFormat::Jpeg));
        assert_eq!(PhotoFormat::parse("png"), Some(PhotoFormat::Png));
        assert_eq!(PhotoFormat::parse("webp"), None);
    }

    #[test]
    fn test_metadata_serialization_round_trip() {
        let metadata = PhotoMetadata {
            width: 350,
            height: 450,
            size_bytes: 18432,
            quality: 80,
            format: PhotoFormat::Jpeg,
        };

        let json = serde_json::to_string(&metadata).unwrap();
        let deserialized: PhotoMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(metadata, deserialized);
    }

    #[test]
    fn test_attachment_without_metadata_skips_field() {
        let attachment = PhotoAttachment::new("data:image/jpeg;base64,AAAA".to_string());
        let json = serde_json::to_string(&attachment).unwrap();
        assert!(!json.contains("metadata"));
    }
}
