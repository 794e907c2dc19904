//! Heuristic photo metadata derivation.
//!
//! Works from an already-encoded data URI: the format comes from the
//! declared header, the byte size is back-computed from the base64 length
//! and padding without decoding, the dimensions come from decoding the
//! payload, and the quality is *estimated* from bytes-per-pixel density.
//! The true encoder quality parameter is not recoverable from the bytes,
//! so the estimate is best-effort display data, not ground truth.

use enroll_core::{AppError, PhotoFormat, PhotoMetadata};

use crate::encoder::{decode_data_uri, parse_data_uri};

/// Estimates below this are implausible for photographic JPEG content and
/// get replaced by the default.
pub const MIN_PLAUSIBLE_QUALITY: u8 = 30;
/// Fallback estimate when the density heuristic lands below the floor.
pub const DEFAULT_QUALITY_ESTIMATE: u8 = 75;
/// Empirical slope mapping JPEG bits-per-pixel to a quality percent for
/// photographic content.
const QUALITY_PER_BIT_PER_PIXEL: f64 = 55.0;

/// Derive display metadata from an encoded photo.
pub fn derive_metadata(data_uri: &str) -> Result<PhotoMetadata, AppError> {
    let (format, payload) = parse_data_uri(data_uri)?;
    let size_bytes = encoded_byte_len(payload);

    let img = decode_data_uri(data_uri)?;
    let (width, height) = (img.width(), img.height());

    let quality = match format {
        // Lossless: there is no quality knob to estimate.
        PhotoFormat::Png => 100,
        PhotoFormat::Jpeg => estimate_jpeg_quality(size_bytes, width, height),
    };

    tracing::debug!(width, height, size_bytes, quality, "derived photo metadata");

    Ok(PhotoMetadata {
        width,
        height,
        size_bytes,
        quality,
        format,
    })
}

/// Raw byte count of a base64 payload, recovered from its length and
/// trailing padding markers without decoding.
fn encoded_byte_len(payload: &str) -> u64 {
    let padding = payload.chars().rev().take_while(|c| *c == '=').count() as u64;
    let groups = payload.len() as u64 / 4;
    (groups * 3).saturating_sub(padding)
}

fn estimate_jpeg_quality(size_bytes: u64, width: u32, height: u32) -> u8 {
    let pixels = width as u64 * height as u64;
    if pixels == 0 {
        return DEFAULT_QUALITY_ESTIMATE;
    }
    let bits_per_pixel = size_bytes as f64 * 8.0 / pixels as f64;
    let estimate = (bits_per_pixel * QUALITY_PER_BIT_PER_PIXEL).round();
    let estimate = estimate.clamp(0.0, 100.0) as u8;
    if estimate < MIN_PLAUSIBLE_QUALITY {
        DEFAULT_QUALITY_ESTIMATE
    } else {
        estimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::PhotoEncoder;
    use image::{DynamicImage, Rgb, RgbImage};

    fn noisy(w: u32, h: u32) -> DynamicImage {
        let mut img = RgbImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = ((x * 31 + y * 17) % 256) as u8;
                img.put_pixel(x, y, Rgb([v, v.wrapping_mul(3), v.wrapping_add(91)]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_encoded_byte_len_matches_decoded() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        for len in [0usize, 1, 2, 3, 4, 5, 300] {
            let bytes = vec![0xABu8; len];
            let payload = STANDARD.encode(&bytes);
            assert_eq!(encoded_byte_len(&payload), len as u64, "len {}", len);
        }
    }

    #[test]
    fn test_derive_reports_dims_format_and_size() {
        let img = noisy(96, 72);
        let uri = PhotoEncoder::encode_jpeg(&img, 0.8).unwrap();
        let (_, payload) = parse_data_uri(&uri).unwrap();

        let metadata = derive_metadata(&uri).unwrap();
        assert_eq!(metadata.width, 96);
        assert_eq!(metadata.height, 72);
        assert_eq!(metadata.format, PhotoFormat::Jpeg);
        assert_eq!(metadata.size_bytes, encoded_byte_len(payload));
    }

    #[test]
    fn test_png_quality_is_full() {
        let img = noisy(32, 32);
        let uri = PhotoEncoder::encode_png(&img).unwrap();
        let metadata = derive_metadata(&uri).unwrap();
        assert_eq!(metadata.quality, 100);
    }

    #[test]
    fn test_quality_floor_clamps_to_default() {
        // 1000x1000 at 100 bytes is far below any plausible density.
        assert_eq!(
            estimate_jpeg_quality(100, 1000, 1000),
            DEFAULT_QUALITY_ESTIMATE
        );
    }

    #[test]
    fn test_quality_estimate_is_capped() {
        assert_eq!(estimate_jpeg_quality(1_000_000, 10, 10), 100);
    }

    #[test]
    fn test_estimate_tracks_density() {
        let sparse = estimate_jpeg_quality(20_000, 320, 240);
        let dense = estimate_jpeg_quality(60_000, 320, 240);
        assert!(dense >= sparse);
    }

    #[test]
    fn test_derive_rejects_invalid_uri() {
        assert!(derive_metadata("data:image/jpeg;base64,@@@").is_err());
        assert!(derive_metadata("hello").is_err());
    }
}
