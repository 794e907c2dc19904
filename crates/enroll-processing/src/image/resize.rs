//! Resampling.
//!
//! Filter quality scales with how aggressive the downscale is; heavy
//! reductions tolerate a cheaper filter.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use enroll_core::AppError;

use super::crop::CropRegion;

/// Select a resampling filter based on the reduction ratio.
pub fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        FilterType::Triangle
    } else if max_ratio > 1.5 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

/// Resample `region` of `img` into a buffer of exactly `(out_w, out_h)`.
pub fn crop_resize(
    img: &DynamicImage,
    region: &CropRegion,
    out_w: u32,
    out_h: u32,
) -> Result<DynamicImage, AppError> {
    if out_w == 0 || out_h == 0 {
        return Err(AppError::ImageProcessing(format!(
            "zero output dimension: {}x{}",
            out_w, out_h
        )));
    }

    let (sw, sh) = img.dimensions();
    if sw == 0 || sh == 0 {
        return Err(AppError::ImageProcessing("empty source buffer".to_string()));
    }
    let (x, y, w, h) = region.to_pixels(sw, sh);

    tracing::debug!(x, y, w, h, out_w, out_h, "resampling crop region");

    let cropped = img.crop_imm(x, y, w, h);
    if (w, h) == (out_w, out_h) {
        return Ok(cropped);
    }
    let filter = select_filter(w, h, out_w, out_h);
    Ok(cropped.resize_exact(out_w, out_h, filter))
}

/// Re-render a captured frame at target dimensions (the capture buffer
/// operation).
pub fn fit_frame(frame: &DynamicImage, tw: u32, th: u32) -> Result<DynamicImage, AppError> {
    if tw == 0 || th == 0 {
        return Err(AppError::ImageProcessing(format!(
            "zero target dimension: {}x{}",
            tw, th
        )));
    }
    let (w, h) = frame.dimensions();
    if (w, h) == (tw, th) {
        return Ok(frame.clone());
    }
    Ok(frame.resize_exact(tw, th, select_filter(w, h, tw, th)))
}
