//! Capture session lifecycle.
//!
//! Owns at most one live stream. Starting tears down any existing stream
//! first (stop-before-start is the only ordering guarantee the capture
//! layer gives), and an overconstrained request is retried exactly once
//! with relaxed constraints. Any other failure leaves the session stopped
//! and is reported as-is.

use std::sync::Arc;

use crate::constraints::CaptureConstraints;
use crate::device::{CameraDeviceInfo, ZoomRange};
use crate::error::CameraError;
use crate::source::{CameraSource, CameraStream, Frame};

pub struct CaptureSession {
    source: Arc<dyn CameraSource>,
    stream: Option<Box<dyn CameraStream>>,
}

impl CaptureSession {
    pub fn new(source: Arc<dyn CameraSource>) -> Self {
        Self {
            source,
            stream: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Resolution of the live stream, if any.
    pub fn negotiated(&self) -> Option<(u32, u32)> {
        self.stream.as_ref().map(|s| s.negotiated())
    }

    pub async fn list_devices(&self) -> Result<Vec<CameraDeviceInfo>, CameraError> {
        self.source.list_devices().await
    }

    /// Start a stream for the given constraints, stopping any running one
    /// first. On `Overconstrained`, drops the specific device/resolution
    /// and retries once unconstrained; all other errors surface directly.
    pub async fn start(&mut self, constraints: &CaptureConstraints) -> Result<(), CameraError> {
        self.stop().await;
        self.source.request_permission().await?;

        let stream = match self.source.open(constraints).await {
            Ok(stream) => stream,
            Err(CameraError::Overconstrained(detail)) => {
                tracing::warn!(%detail, "constraints unsatisfiable, retrying unconstrained");
                self.source.open(&constraints.relaxed()).await?
            }
            Err(err) => return Err(err),
        };

        tracing::info!(
            device_id = stream.device_id(),
            width = stream.negotiated().0,
            height = stream.negotiated().1,
            "camera session started"
        );
        self.stream = Some(stream);
        Ok(())
    }

    /// Zoom range of the live stream's device, `None` when stopped or
    /// unsupported.
    pub fn zoom_range(&self) -> Option<ZoomRange> {
        self.stream.as_ref().and_then(|s| s.zoom_range())
    }

    /// Apply a zoom level, best-effort: an unsupported device or a failed
    /// apply is logged and otherwise ignored, so the live preview keeps
    /// running.
    pub async fn set_zoom(&mut self, level: f32) {
        if let Some(stream) = self.stream.as_mut() {
            if let Err(err) = stream.set_zoom(level).await {
                tracing::warn!(%err, "zoom not applied");
            }
        }
    }

    /// Capture a single frame from the live stream.
    pub async fn grab(&mut self) -> Result<Frame, CameraError> {
        match self.stream.as_mut() {
            Some(stream) => stream.grab_frame().await,
            None => Err(CameraError::StreamClosed),
        }
    }

    /// Stop and release the stream. Idempotent.
    pub async fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop().await;
            tracing::debug!(device_id = stream.device_id(), "camera session stopped");
        }
    }
}
