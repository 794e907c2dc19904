//! Crop geometry.
//!
//! `CropRect` is what the user drags (two corners, any order);
//! `CropRegion` is a normalized, non-negative rectangle ready for
//! resampling; `center_crop_region` computes the maximal centered region
//! matching a target aspect ratio.

use enroll_core::AppError;

/// A dragged rectangle: start (anchor) and end corner in source-pixel
/// coordinates, in whatever order the drag produced them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl CropRect {
    pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Self { start, end }
    }

    /// Normalize to a non-negative region via per-axis min/max.
    pub fn normalized(&self) -> CropRegion {
        let x = self.start.0.min(self.end.0);
        let y = self.start.1.min(self.end.1);
        CropRegion {
            x,
            y,
            width: (self.start.0 - self.end.0).abs(),
            height: (self.start.1 - self.end.1).abs(),
        }
    }

    /// Zero-area rectangles are allowed transiently during a drag but are
    /// rejected on commit.
    pub fn is_empty(&self) -> bool {
        let region = self.normalized();
        region.width < 1.0 || region.height < 1.0
    }
}

/// Normalized crop region: origin plus non-negative dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Integer pixel rectangle, clamped into a `(source_w, source_h)`
    /// buffer with at least one pixel on each axis.
    pub fn to_pixels(&self, source_w: u32, source_h: u32) -> (u32, u32, u32, u32) {
        let x = (self.x.round().max(0.0) as u32).min(source_w.saturating_sub(1));
        let y = (self.y.round().max(0.0) as u32).min(source_h.saturating_sub(1));
        let w = (self.width.round() as u32).clamp(1, source_w - x);
        let h = (self.height.round() as u32).clamp(1, source_h - y);
        (x, y, w, h)
    }
}

/// Aspect constraint for interactive cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectPolicy {
    /// No constraint; the committed crop keeps the dragged dimensions.
    #[default]
    Free,
    /// The crop must match `width / height`; the committed crop is
    /// resampled to exactly these dimensions.
    Fixed { width: u32, height: u32 },
}

impl AspectPolicy {
    pub fn ratio(&self) -> Option<f64> {
        match self {
            AspectPolicy::Free => None,
            AspectPolicy::Fixed { width, height } => Some(*width as f64 / *height as f64),
        }
    }
}

/// Maximal crop region centered in a `(sw, sh)` source matching the
/// `tw / th` target aspect ratio.
///
/// If the source is wider than the target ratio the height is kept and the
/// width trimmed, otherwise the width is kept and the height trimmed; the
/// constrained axis is centered.
pub fn center_crop_region(sw: u32, sh: u32, tw: u32, th: u32) -> Result<CropRegion, AppError> {
    if sw == 0 || sh == 0 || tw == 0 || th == 0 {
        return Err(AppError::ImageProcessing(format!(
            "degenerate crop request: source {}x{}, target {}x{}",
            sw, sh, tw, th
        )));
    }

    let source_ratio = sw as f64 / sh as f64;
    let target_ratio = tw as f64 / th as f64;

    let (width, height) = if source_ratio > target_ratio {
        (sh as f64 * target_ratio, sh as f64)
    } else {
        (sw as f64, sw as f64 / target_ratio)
    };

    Ok(CropRegion {
        x: (sw as f64 - width) / 2.0,
        y: (sh as f64 - height) / 2.0,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_center_crop_wider_source() {
        // Worked example: 1280x960 source, 35:45 passport target.
        let region = center_crop_region(1280, 960, 35, 45).unwrap();
        assert!((region.width - 960.0 * 35.0 / 45.0).abs() < EPS);
        assert!((region.height - 960.0).abs() < EPS);
        assert!((region.x - (1280.0 - 960.0 * 35.0 / 45.0) / 2.0).abs() < EPS);
        assert!(region.y.abs() < EPS);
    }

    #[test]
    fn test_center_crop_taller_source() {
        let region = center_crop_region(480, 640, 16, 9).unwrap();
        assert!((region.width - 480.0).abs() < EPS);
        assert!((region.height - 480.0 * 9.0 / 16.0).abs() < EPS);
        assert!(region.x.abs() < EPS);
        assert!((region.y - (640.0 - region.height) / 2.0).abs() < EPS);
    }

    #[test]
    fn test_center_crop_aspect_and_containment() {
        for &(sw, sh) in &[(1280u32, 960u32), (640, 480), (333, 777), (45, 35)] {
            for &(tw, th) in &[(35u32, 45u32), (1, 1), (16, 9), (9, 16)] {
                let region = center_crop_region(sw, sh, tw, th).unwrap();
                let target = tw as f64 / th as f64;
                assert!(
                    (region.aspect_ratio() - target).abs() < EPS,
                    "aspect mismatch for {}x{} -> {}:{}",
                    sw,
                    sh,
                    tw,
                    th
                );
                assert!(region.x >= -EPS && region.y >= -EPS);
                assert!(region.x + region.width <= sw as f64 + EPS);
                assert!(region.y + region.height <= sh as f64 + EPS);
                // Maximality: one axis spans the full source.
                let spans_w = (region.width - sw as f64).abs() < EPS;
                let spans_h = (region.height - sh as f64).abs() < EPS;
                assert!(spans_w || spans_h);
            }
        }
    }

    #[test]
    fn test_center_crop_matching_aspect_is_identity() {
        let region = center_crop_region(700, 900, 35, 45).unwrap();
        assert!((region.width - 700.0).abs() < EPS);
        assert!((region.height - 900.0).abs() < EPS);
        assert!(region.x.abs() < EPS && region.y.abs() < EPS);
    }

    #[test]
    fn test_center_crop_rejects_zero_dims() {
        assert!(center_crop_region(0, 100, 1, 1).is_err());
        assert!(center_crop_region(100, 100, 0, 1).is_err());
    }

    #[test]
    fn test_normalized_handles_any_drag_direction() {
        let up_left = CropRect::new((100.0, 80.0), (20.0, 10.0));
        let region = up_left.normalized();
        assert_eq!(region.x, 20.0);
        assert_eq!(region.y, 10.0);
        assert_eq!(region.width, 80.0);
        assert_eq!(region.height, 70.0);
    }

    #[test]
    fn test_zero_area_is_empty() {
        let rect = CropRect::new((5.0, 5.0), (5.0, 5.0));
        assert!(rect.is_empty());
        let thin = CropRect::new((5.0, 5.0), (5.5, 100.0));
        assert!(thin.is_empty());
    }

    #[test]
    fn test_to_pixels_clamps_into_source() {
        let region = CropRegion {
            x: -3.0,
            y: 2.0,
            width: 5000.0,
            height: 10.0,
        };
        let (x, y, w, h) = region.to_pixels(640, 480);
        assert_eq!((x, y), (0, 2));
        assert_eq!(w, 640);
        assert_eq!(h, 10);
    }

    #[test]
    fn test_aspect_policy_ratio() {
        assert_eq!(AspectPolicy::Free.ratio(), None);
        let fixed = AspectPolicy::Fixed {
            width: 35,
            height: 45,
        };
        assert!((fixed.ratio().unwrap() - 35.0 / 45.0).abs() < EPS);
    }
}
