//! Photo encoding.
//!
//! The sole interchange format between capture, crop, the directory and
//! display is a base64 data URI whose header names the image format.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

use enroll_core::{AppError, PhotoFormat};

const DATA_URI_PREFIX: &str = "data:image/";

pub struct PhotoEncoder;

impl PhotoEncoder {
    /// Encode as JPEG at a quality factor in `[0, 1]` (clamped), framed as
    /// a data URI.
    pub fn encode_jpeg(img: &DynamicImage, quality: f32) -> Result<String, AppError> {
        let bytes = Self::jpeg_bytes(img, quality)?;
        Ok(Self::to_data_uri(PhotoFormat::Jpeg, &bytes))
    }

    /// Encode as PNG (lossless), framed as a data URI.
    pub fn encode_png(img: &DynamicImage) -> Result<String, AppError> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
        Ok(Self::to_data_uri(PhotoFormat::Png, &buffer))
    }

    /// Raw JPEG bytes at a quality factor in `[0, 1]`.
    pub fn jpeg_bytes(img: &DynamicImage, quality: f32) -> Result<Bytes, AppError> {
        let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;

        // JPEG has no alpha channel; flatten first.
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut buffer = Vec::with_capacity(rgb_capacity(width, height));
        let mut cursor = Cursor::new(&mut buffer);
        let encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
        rgb.write_with_encoder(encoder)?;

        tracing::debug!(width, height, quality, bytes = buffer.len(), "encoded jpeg");
        Ok(Bytes::from(buffer))
    }

    fn to_data_uri(format: PhotoFormat, bytes: &[u8]) -> String {
        format!(
            "{}{};base64,{}",
            DATA_URI_PREFIX,
            format.as_str(),
            BASE64.encode(bytes)
        )
    }
}

/// Uncompressed RGB byte count, used as the encoder's capacity hint.
/// Computed in usize: `width * height * 3` overflows u32 past ~37
/// megapixels.
fn rgb_capacity(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Split a data URI into its declared format and base64 payload.
pub fn parse_data_uri(uri: &str) -> Result<(PhotoFormat, &str), AppError> {
    let rest = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| AppError::Encoding("missing data:image/ header".to_string()))?;
    let (format_tag, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::Encoding("missing ;base64, marker".to_string()))?;
    let format = PhotoFormat::parse(format_tag)
        .ok_or_else(|| AppError::Encoding(format!("unknown image format: {}", format_tag)))?;
    Ok((format, payload))
}

/// Decode a data URI back into pixels.
pub fn decode_data_uri(uri: &str) -> Result<DynamicImage, AppError> {
    let (format, payload) = parse_data_uri(uri)?;
    let bytes = BASE64.decode(payload)?;
    let img = image::load_from_memory_with_format(
        &bytes,
        match format {
            PhotoFormat::Jpeg => ImageFormat::Jpeg,
            PhotoFormat::Png => ImageFormat::Png,
        },
    )?;
    Ok(img)
}
