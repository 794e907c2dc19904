//! Camera source and stream traits.
//!
//! These replace the browser capture API at the in-process boundary: a
//! source answers capability queries and opens streams, a stream hands out
//! frames until stopped. Everything is a one-shot async call with a typed
//! error; there is no retry policy at this layer.

use async_trait::async_trait;
use image::{DynamicImage, RgbImage};

use crate::constraints::CaptureConstraints;
use crate::device::{CameraDeviceInfo, ZoomRange};
use crate::error::CameraError;

/// One captured frame, tightly packed RGB8.
#[derive(Debug, Clone)]
pub struct Frame {
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// Decode into an owned image buffer for the processing pipeline.
    pub fn into_image(self) -> Result<DynamicImage, CameraError> {
        let Frame {
            width,
            height,
            data,
            ..
        } = self;
        let len = data.len();
        RgbImage::from_raw(width, height, data)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| {
                CameraError::InvalidFrame(format!(
                    "{} bytes for {}x{} rgb",
                    len, width, height
                ))
            })
    }
}

/// A device capability and acquisition backend.
#[async_trait]
pub trait CameraSource: Send + Sync {
    /// Ask the user (or platform) for capture permission. Idempotent.
    async fn request_permission(&self) -> Result<(), CameraError>;

    /// Enumerate capture devices. Requires permission.
    async fn list_devices(&self) -> Result<Vec<CameraDeviceInfo>, CameraError>;

    /// Negotiate constraints and open a live stream.
    async fn open(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// A live, negotiated stream of frames.
#[async_trait]
pub trait CameraStream: Send {
    /// The resolution the source settled on, which may differ from the
    /// requested one.
    fn negotiated(&self) -> (u32, u32);

    /// Id of the device backing this stream.
    fn device_id(&self) -> &str;

    /// Zoom range of the backing device, `None` when zoom is unsupported.
    fn zoom_range(&self) -> Option<ZoomRange>;

    /// Apply a zoom level, clamped into the device range. Fails with
    /// `NotSupported` on devices without zoom.
    async fn set_zoom(&mut self, level: f32) -> Result<(), CameraError>;

    /// Capture a single frame.
    async fn grab_frame(&mut self) -> Result<Frame, CameraError>;

    /// Release the device. Further grabs fail with `StreamClosed`.
    async fn stop(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_into_image() {
        let frame = Frame {
            sequence: 0,
            width: 2,
            height: 2,
            data: vec![0u8; 12],
        };
        let img = frame.into_image().unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
    }

    #[test]
    fn test_frame_with_short_buffer_fails() {
        let frame = Frame {
            sequence: 0,
            width: 2,
            height: 2,
            data: vec![0u8; 5],
        };
        let err = frame.into_image().err().unwrap();
        assert!(matches!(err, CameraError::InvalidFrame(_)));
        assert!(err.to_string().contains("2x2"));
    }
}
