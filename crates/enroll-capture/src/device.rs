use serde::{Deserialize, Serialize};

/// Which way a camera faces, mirroring the capture API's facing-mode hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front camera, facing the user.
    User,
    /// Back camera, facing the environment.
    Environment,
}

impl FacingMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" | "front" => Some(FacingMode::User),
            "environment" | "back" => Some(FacingMode::Environment),
            _ => None,
        }
    }
}

/// Optical/digital zoom range a device advertises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
}

impl ZoomRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, level: f32) -> f32 {
        level.clamp(self.min, self.max)
    }
}

/// A capture resolution a device supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraFormat {
    pub width: u32,
    pub height: u32,
}

impl CameraFormat {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Distance metric used when snapping a requested resolution to the
    /// closest supported format.
    pub fn area_diff(self, width: u32, height: u32) -> u64 {
        let requested = width as u64 * height as u64;
        self.area().abs_diff(requested)
    }
}

/// Descriptor for one enumerated capture device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDeviceInfo {
    pub device_id: String,
    pub label: String,
    pub facing: FacingMode,
    pub formats: Vec<CameraFormat>,
    /// `None` when the device does not support zoom.
    pub zoom: Option<ZoomRange>,
}

impl CameraDeviceInfo {
    /// The format closest in pixel count to the requested resolution, or
    /// the device default when nothing was requested.
    pub fn nearest_format(&self, requested: Option<(u32, u32)>) -> Option<CameraFormat> {
        match requested {
            None => self.formats.first().copied(),
            Some((w, h)) => self
                .formats
                .iter()
                .copied()
                .min_by_key(|f| f.area_diff(w, h)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> CameraDeviceInfo {
        CameraDeviceInfo {
            device_id: "cam-0".to_string(),
            label: "Test Camera".to_string(),
            facing: FacingMode::User,
            formats: vec![
                CameraFormat::new(640, 480),
                CameraFormat::new(320, 240),
                CameraFormat::new(1280, 720),
            ],
            zoom: Some(ZoomRange::new(1.0, 3.0)),
        }
    }

    #[test]
    fn test_nearest_format_exact_match() {
        let format = device().nearest_format(Some((1280, 720))).unwrap();
        assert_eq!(format, CameraFormat::new(1280, 720));
    }

    #[test]
    fn test_nearest_format_snaps() {
        let format = device().nearest_format(Some((1920, 1080))).unwrap();
        assert_eq!(format, CameraFormat::new(1280, 720));
    }

    #[test]
    fn test_default_format_is_first() {
        let format = device().nearest_format(None).unwrap();
        assert_eq!(format, CameraFormat::new(640, 480));
    }

    #[test]
    fn test_zoom_range_clamps() {
        let range = ZoomRange::new(1.0, 3.0);
        assert_eq!(range.clamp(0.5), 1.0);
        assert_eq!(range.clamp(2.0), 2.0);
        assert_eq!(range.clamp(9.0), 3.0);
    }

    #[test]
    fn test_facing_mode_parse() {
        assert_eq!(FacingMode::parse("user"), Some(FacingMode::User));
        assert_eq!(FacingMode::parse("back"), Some(FacingMode::Environment));
        assert_eq!(FacingMode::parse("sideways"), None);
    }
}
