//! Camera source abstraction for the enrollment kiosk.
//!
//! Device enumeration, constraint negotiation and frame capture sit behind
//! the [`CameraSource`]/[`CameraStream`] traits; [`SyntheticCamera`] is the
//! deterministic in-process backend used by the kiosk and its tests. Every
//! acquisition step is a one-shot async operation returning a typed
//! [`CameraError`] on failure.

pub mod constraints;
pub mod device;
pub mod error;
pub mod session;
pub mod source;
pub mod synthetic;

pub use constraints::{CaptureConstraints, RESOLUTION_PRESETS};
pub use device::{CameraDeviceInfo, CameraFormat, FacingMode, ZoomRange};
pub use error::CameraError;
pub use session::CaptureSession;
pub use source::{CameraSource, CameraStream, Frame};
pub use synthetic::SyntheticCamera;
