//! Frame transforms, one configured unit per pipeline stage.
//!
//! ```text
//! transforms/
//! ├── scale.rs            → short-side resize
//! ├── crop.rs             → random and center square crops
//! ├── multi_scale_crop.rs → scale/aspect/position crop sampling
//! ├── flip.rs             → shared horizontal mirror
//! ├── conversion.rs       → frame list to (N, 3, H, W) array
//! └── normalization.rs    → per-channel standardization
//! ```
//!
//! All transforms are re-exported at the module level.

pub mod conversion;
pub mod crop;
pub mod flip;
pub mod multi_scale_crop;
pub mod normalization;
pub mod scale;

pub use conversion::Image2Array;
pub use crop::{CenterCrop, CropRegion, RandomCrop};
pub use flip::RandomFlip;
pub use multi_scale_crop::MultiScaleCrop;
pub use normalization::Normalization;
pub use scale::Scale;

use image::RgbImage;

use crate::core::errors::{Result, TransformError};

/// Reference dimensions for a shared per-sample decision: the first
/// frame's width and height. All frames of a sample share dimensions at
/// every pipeline stage, so the first frame stands in for the whole clip.
pub(crate) fn reference_dimensions(frames: &[RgbImage]) -> Result<(u32, u32)> {
    match frames.first() {
        Some(img) => Ok(img.dimensions()),
        None => Err(TransformError::invalid_input("sample contains no frames")),
    }
}
