use serde::{Deserialize, Serialize};

use crate::device::{CameraFormat, FacingMode};

/// Resolution presets offered by the capture settings panel.
pub const RESOLUTION_PRESETS: [CameraFormat; 4] = [
    CameraFormat::new(320, 240),
    CameraFormat::new(640, 480),
    CameraFormat::new(1280, 720),
    CameraFormat::new(1920, 1080),
];

/// Desired capture constraints. All fields are "ideal" hints except the
/// device id, which is treated as a hard requirement when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureConstraints {
    pub device_id: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub facing_mode: Option<FacingMode>,
}

impl CaptureConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn facing(mut self, mode: FacingMode) -> Self {
        self.facing_mode = Some(mode);
        self
    }

    pub fn requested_resolution(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }

    /// Fallback constraints used after an overconstrained failure: drop the
    /// specific device and resolution and ask for any camera.
    pub fn relaxed(&self) -> Self {
        Self::default()
    }
}
