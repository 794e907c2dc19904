//! Camera acquisition errors.
//!
//! One variant per failure the capture boundary can report. Each maps to a
//! fixed user-facing message; none is fatal to the process and every
//! failure leaves the session in its pre-call state.

#[derive(Debug, Clone, thiserror::Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera device found")]
    DeviceNotFound,

    #[error("camera capture is not supported on this platform")]
    NotSupported,

    #[error("camera device is in use: {0}")]
    DeviceInUse(String),

    #[error("requested constraints cannot be satisfied: {0}")]
    Overconstrained(String),

    #[error("camera stream is closed")]
    StreamClosed,

    #[error("camera produced an invalid frame: {0}")]
    InvalidFrame(String),
}

impl CameraError {
    /// Fixed alert text shown to the user for each failure class.
    pub fn user_message(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => {
                "Camera access denied. Please allow camera permissions and try again."
            }
            CameraError::DeviceNotFound => {
                "No camera found. Please connect a camera and try again."
            }
            CameraError::NotSupported => "Camera access is not supported on this device.",
            CameraError::DeviceInUse(_) => "Camera is already in use by another application.",
            CameraError::Overconstrained(_) => {
                "Selected camera not available. Please try a different camera."
            }
            CameraError::StreamClosed => "The camera is not running. Please start it first.",
            CameraError::InvalidFrame(_) => {
                "The camera returned a broken frame. Please retake the photo."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_ignores_detail() {
        let a = CameraError::DeviceInUse("cam-0".to_string());
        let b = CameraError::DeviceInUse("cam-1".to_string());
        assert_eq!(a.user_message(), b.user_message());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = CameraError::Overconstrained("no device cam-9".to_string());
        assert!(err.to_string().contains("cam-9"));
    }
}
