//! Configuration module
//!
//! Env-driven settings for capture and photo processing. Every field has a
//! default so the kiosk runs with no environment at all; `ENROLL_*`
//! variables override individual values.

use std::env;

const DEFAULT_CAPTURE_WIDTH: u32 = 640;
const DEFAULT_CAPTURE_HEIGHT: u32 = 480;
const DEFAULT_JPEG_QUALITY: f32 = 0.8;
// Passport photo at 35x45 mm, 10 px/mm.
const DEFAULT_PASSPORT_WIDTH: u32 = 350;
const DEFAULT_PASSPORT_HEIGHT: u32 = 450;
const DEFAULT_MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration shared by the capture and registration flows.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Preferred camera resolution requested from the source.
    pub capture_width: u32,
    pub capture_height: u32,
    /// JPEG quality factor in [0, 1] used when encoding captured photos.
    pub jpeg_quality: f32,
    /// Target dimensions for the passport-style crop.
    pub passport_width: u32,
    pub passport_height: u32,
    /// Upper bound on the encoded photo size accepted by registration.
    pub max_photo_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capture_width: DEFAULT_CAPTURE_WIDTH,
            capture_height: DEFAULT_CAPTURE_HEIGHT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            passport_width: DEFAULT_PASSPORT_WIDTH,
            passport_height: DEFAULT_PASSPORT_HEIGHT,
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            capture_width: env_u32("ENROLL_CAPTURE_WIDTH", defaults.capture_width),
            capture_height: env_u32("ENROLL_CAPTURE_HEIGHT", defaults.capture_height),
            jpeg_quality: env::var("ENROLL_JPEG_QUALITY")
                .ok()
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|q| (0.0..=1.0).contains(q))
                .unwrap_or(defaults.jpeg_quality),
            passport_width: env_u32("ENROLL_PASSPORT_WIDTH", defaults.passport_width),
            passport_height: env_u32("ENROLL_PASSPORT_HEIGHT", defaults.passport_height),
            max_photo_bytes: env::var("ENROLL_MAX_PHOTO_BYTES")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(defaults.max_photo_bytes),
        }
    }

    /// Passport aspect ratio (width / height).
    pub fn passport_aspect(&self) -> f64 {
        self.passport_width as f64 / self.passport_height as f64
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
