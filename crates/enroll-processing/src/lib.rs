//! Photo processing for the enrollment kiosk.
//!
//! The crop/resize engine (center crop, interactive crop editing,
//! resampling), the data-URI photo encoder and the heuristic metadata
//! deriver. All pixel work goes through the `image` crate.

pub mod encoder;
pub mod image;
pub mod metadata;

pub use crate::image::crop::{center_crop_region, AspectPolicy, CropRect, CropRegion};
pub use crate::image::editor::CropEditor;
pub use crate::image::resize::{crop_resize, fit_frame, select_filter};
pub use encoder::{decode_data_uri, parse_data_uri, PhotoEncoder};
pub use metadata::{derive_metadata, DEFAULT_QUALITY_ESTIMATE, MIN_PLAUSIBLE_QUALITY};
