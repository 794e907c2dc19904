//! Deterministic in-process camera backend.
//!
//! Stands in for real capture hardware: a configurable device table,
//! gradient test-pattern frames and failure injection for the permission
//! and device-in-use paths. The kiosk binary and the tests both run
//! against this source.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::constraints::{CaptureConstraints, RESOLUTION_PRESETS};
use crate::device::{CameraDeviceInfo, CameraFormat, FacingMode, ZoomRange};
use crate::error::CameraError;
use crate::source::{CameraSource, CameraStream, Frame};

/// Synthetic camera source with a fixed device table.
pub struct SyntheticCamera {
    devices: Vec<CameraDeviceInfo>,
    permission_granted: bool,
    busy: HashSet<String>,
}

impl SyntheticCamera {
    /// Two-device default: a front and a back camera with the usual
    /// resolution ladder.
    pub fn new() -> Self {
        // Default format first: 640x480, then the rest of the preset
        // ladder.
        let mut formats = vec![CameraFormat::new(640, 480)];
        for format in RESOLUTION_PRESETS {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        Self::with_devices(vec![
            CameraDeviceInfo {
                device_id: "synthetic-front".to_string(),
                label: "Synthetic Front Camera".to_string(),
                facing: FacingMode::User,
                formats: formats.clone(),
                zoom: Some(ZoomRange::new(1.0, 3.0)),
            },
            // The back camera advertises no zoom capability.
            CameraDeviceInfo {
                device_id: "synthetic-back".to_string(),
                label: "Synthetic Back Camera".to_string(),
                facing: FacingMode::Environment,
                formats,
                zoom: None,
            },
        ])
    }

    pub fn with_devices(devices: Vec<CameraDeviceInfo>) -> Self {
        Self {
            devices,
            permission_granted: true,
            busy: HashSet::new(),
        }
    }

    /// Simulate the user denying the permission prompt.
    pub fn without_permission(mut self) -> Self {
        self.permission_granted = false;
        self
    }

    /// Mark a device as held by another application.
    pub fn with_device_in_use(mut self, device_id: impl Into<String>) -> Self {
        self.busy.insert(device_id.into());
        self
    }

    fn select_device(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<&CameraDeviceInfo, CameraError> {
        if self.devices.is_empty() {
            return Err(CameraError::DeviceNotFound);
        }

        if let Some(id) = &constraints.device_id {
            return self
                .devices
                .iter()
                .find(|d| &d.device_id == id)
                .ok_or_else(|| CameraError::Overconstrained(format!("no device {}", id)));
        }

        // Facing mode is an ideal hint: prefer a match, fall back to the
        // first device.
        if let Some(facing) = constraints.facing_mode {
            if let Some(device) = self.devices.iter().find(|d| d.facing == facing) {
                return Ok(device);
            }
        }
        Ok(&self.devices[0])
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CameraSource for SyntheticCamera {
    async fn request_permission(&self) -> Result<(), CameraError> {
        if self.permission_granted {
            Ok(())
        } else {
            Err(CameraError::PermissionDenied)
        }
    }

    async fn list_devices(&self) -> Result<Vec<CameraDeviceInfo>, CameraError> {
        self.request_permission().await?;
        Ok(self.devices.clone())
    }

    async fn open(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Box<dyn CameraStream>, CameraError> {
        self.request_permission().await?;
        let device = self.select_device(constraints)?;

        if self.busy.contains(&device.device_id) {
            return Err(CameraError::DeviceInUse(device.device_id.clone()));
        }

        let format = device
            .nearest_format(constraints.requested_resolution())
            .ok_or_else(|| {
                CameraError::Overconstrained(format!(
                    "device {} exposes no capture formats",
                    device.device_id
                ))
            })?;

        tracing::debug!(
            device_id = %device.device_id,
            width = format.width,
            height = format.height,
            "opening synthetic stream"
        );

        Ok(Box::new(SyntheticStream {
            device_id: device.device_id.clone(),
            format,
            zoom_range: device.zoom,
            // Zoom starts at the bottom of the range, as the settings
            // panel does.
            zoom: device.zoom.map(|z| z.min).unwrap_or(1.0),
            sequence: 0,
            stopped: false,
        }))
    }
}

struct SyntheticStream {
    device_id: String,
    format: CameraFormat,
    zoom_range: Option<ZoomRange>,
    zoom: f32,
    sequence: u64,
    stopped: bool,
}

impl SyntheticStream {
    /// Gradient test pattern: red rises left to right, green top to
    /// bottom, blue varies with the frame sequence. Zoom magnifies the
    /// pattern around the frame center.
    fn render(&self) -> Vec<u8> {
        let (w, h) = (self.format.width, self.format.height);
        let blue = ((self.sequence * 16) % 256) as u8;
        let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
        let mut data = Vec::with_capacity(w as usize * h as usize * 3);
        for y in 0..h {
            for x in 0..w {
                let sx = cx + (x as f32 - cx) / self.zoom;
                let sy = cy + (y as f32 - cy) / self.zoom;
                data.push((sx * 255.0 / w.max(1) as f32) as u8);
                data.push((sy * 255.0 / h.max(1) as f32) as u8);
                data.push(blue);
            }
        }
        data
    }
}

#[async_trait]
impl CameraStream for SyntheticStream {
    fn negotiated(&self) -> (u32, u32) {
        (self.format.width, self.format.height)
    }

    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn zoom_range(&self) -> Option<ZoomRange> {
        self.zoom_range
    }

    async fn set_zoom(&mut self, level: f32) -> Result<(), CameraError> {
        let range = self.zoom_range.ok_or(CameraError::NotSupported)?;
        self.zoom = range.clamp(level);
        tracing::debug!(device_id = %self.device_id, zoom = self.zoom, "zoom applied");
        Ok(())
    }

    async fn grab_frame(&mut self) -> Result<Frame, CameraError> {
        if self.stopped {
            return Err(CameraError::StreamClosed);
        }
        let frame = Frame {
            sequence: self.sequence,
            width: self.format.width,
            height: self.format.height,
            data: self.render(),
        };
        self.sequence += 1;
        Ok(frame)
    }

    async fn stop(&mut self) {
        self.stopped = true;
    }
}
