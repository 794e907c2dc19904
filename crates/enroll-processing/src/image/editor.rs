//! Interactive crop editing.
//!
//! One `CropEditor` is one crop session: it holds the working photo, a
//! backup of the buffer as it was when the session began, and the current
//! drag state. Pointer coordinates arrive in display space and are scaled
//! to buffer space per axis. Commit replaces the canonical photo; cancel
//! restores the pre-session buffer.

use image::{DynamicImage, GenericImageView};

use enroll_core::AppError;

use super::crop::{AspectPolicy, CropRect};
use super::resize::crop_resize;

pub struct CropEditor {
    photo: DynamicImage,
    backup: DynamicImage,
    display_width: u32,
    display_height: u32,
    policy: AspectPolicy,
    drag: Option<CropRect>,
}

impl CropEditor {
    /// Start a crop session over `photo`, displayed at
    /// `(display_width, display_height)`.
    pub fn new(
        photo: DynamicImage,
        display_width: u32,
        display_height: u32,
        policy: AspectPolicy,
    ) -> Result<Self, AppError> {
        if display_width == 0 || display_height == 0 {
            return Err(AppError::ImageProcessing(format!(
                "zero display dimension: {}x{}",
                display_width, display_height
            )));
        }
        let backup = photo.clone();
        Ok(Self {
            photo,
            backup,
            display_width,
            display_height,
            policy,
            drag: None,
        })
    }

    /// The current canonical photo.
    pub fn photo(&self) -> &DynamicImage {
        &self.photo
    }

    /// The in-progress selection, if any, in buffer coordinates.
    pub fn selection(&self) -> Option<CropRect> {
        self.drag
    }

    /// Scale a display-space point into buffer space, per axis.
    fn to_buffer(&self, display_x: f64, display_y: f64) -> (f64, f64) {
        let (bw, bh) = self.photo.dimensions();
        (
            display_x * bw as f64 / self.display_width as f64,
            display_y * bh as f64 / self.display_height as f64,
        )
    }

    /// Anchor a new drag at a display-space point.
    pub fn begin_drag(&mut self, display_x: f64, display_y: f64) {
        let anchor = self.to_buffer(display_x, display_y);
        self.drag = Some(CropRect::new(anchor, anchor));
    }

    /// Move the far corner of the drag. Under a fixed aspect policy the
    /// corner is re-derived so `height = width / ratio`, preserving the
    /// anchor and the sign of the drag direction on each axis.
    pub fn drag_to(&mut self, display_x: f64, display_y: f64) {
        let point = self.to_buffer(display_x, display_y);
        let ratio = self.policy.ratio();
        match self.drag.as_mut() {
            None => {
                // Drag never started; treat this as the anchor.
                self.drag = Some(CropRect::new(point, point));
            }
            Some(rect) => {
                rect.end = point;
                if let Some(ratio) = ratio {
                    let width = (rect.end.0 - rect.start.0).abs();
                    let height = width / ratio;
                    let sign_y = if rect.end.1 < rect.start.1 { -1.0 } else { 1.0 };
                    rect.end.1 = rect.start.1 + sign_y * height;
                }
            }
        }
    }

    /// Apply the selection: resample it into the policy's target
    /// dimensions (or the selection's own dimensions under `Free`) and
    /// make the result the canonical photo. An empty selection is rejected
    /// and the photo stays unchanged.
    pub fn commit(&mut self) -> Result<(u32, u32), AppError> {
        let rect = self.drag.ok_or_else(|| {
            AppError::InvalidInput("no crop selection to apply".to_string())
        })?;
        if rect.is_empty() {
            return Err(AppError::InvalidInput(
                "crop selection has no area".to_string(),
            ));
        }

        let region = rect.normalized();
        let (out_w, out_h) = match self.policy {
            AspectPolicy::Fixed { width, height } => (width, height),
            AspectPolicy::Free => (
                (region.width.round() as u32).max(1),
                (region.height.round() as u32).max(1),
            ),
        };

        let cropped = crop_resize(&self.photo, &region, out_w, out_h)?;
        tracing::debug!(out_w, out_h, "crop committed");
        self.photo = cropped;
        self.drag = None;
        Ok((out_w, out_h))
    }

    /// Abandon the session: restore the buffer that existed when the
    /// session began and discard all interactive state.
    pub fn cancel(&mut self) {
        self.photo = self.backup.clone();
        self.drag = None;
    }

    /// Consume the editor, keeping the current photo.
    pub fn into_photo(self) -> DynamicImage {
        self.photo
    }
}
