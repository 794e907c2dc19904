//! Image geometry and resampling

pub mod crop;
pub mod editor;
pub mod resize;
