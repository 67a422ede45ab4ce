//! Pipeline configuration: named transform entries and their parameters.
//!
//! A processing chain is described by an ordered list of tagged entries,
//! each naming a transform and carrying its keyword parameters:
//!
//! ```json
//! [
//!     {"name": "Scale", "short_size": 224},
//!     {"name": "MultiScaleCrop", "target_size": 224},
//!     {"name": "RandomFlip", "p": 0.5},
//!     {"name": "Image2Array"},
//!     {"name": "Normalization", "mean": [0.485, 0.456, 0.406], "std": [0.229, 0.224, 0.225]}
//! ]
//! ```
//!
//! Entries resolve to constructed transforms once, at pipeline-build
//! time; omitted fields take the documented defaults.

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::core::registry::TransformKind;
use crate::transforms::{
    CenterCrop, Image2Array, MultiScaleCrop, Normalization, RandomCrop, RandomFlip, Scale,
};

/// Configuration for a single pipeline stage, tagged by transform name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum TransformConfig {
    /// Resize every frame so its shorter side matches `short_size`.
    Scale {
        /// Target length of the shorter side.
        short_size: u32,
    },
    /// Crop a random `target_size` square shared by all frames.
    RandomCrop {
        /// Side of the square crop.
        target_size: u32,
    },
    /// Crop a centered `target_size` square from each frame.
    CenterCrop {
        /// Side of the square crop.
        target_size: u32,
    },
    /// Sample a crop geometry from scale/aspect candidates, then resize
    /// back to a `target_size` square.
    MultiScaleCrop {
        /// Side of the final square output.
        target_size: u32,
        /// Scale ladder applied to the shorter image side.
        #[serde(default = "default_scales")]
        scales: Vec<f64>,
        /// Maximum index distance between paired width/height candidates.
        #[serde(default = "default_max_distort")]
        max_distort: usize,
        /// Draw offsets from the fixed grid instead of uniformly.
        #[serde(default = "default_true")]
        fix_crop: bool,
        /// Extend the fixed grid from 5 to 13 positions.
        #[serde(default = "default_true")]
        more_fix_crop: bool,
    },
    /// Mirror all frames horizontally with probability `p`.
    RandomFlip {
        /// Flip probability.
        #[serde(default = "default_flip_p")]
        p: f64,
    },
    /// Convert the frame list into a `(N, 3, H, W)` f32 array.
    Image2Array,
    /// Scale pixels into `[0, 1]`, then standardize each channel.
    Normalization {
        /// Per-channel means, exactly 3 entries.
        mean: Vec<f32>,
        /// Per-channel standard deviations, exactly 3 entries.
        std: Vec<f32>,
    },
}

fn default_scales() -> Vec<f64> {
    vec![1.0, 0.875, 0.75, 0.66]
}

fn default_max_distort() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_flip_p() -> f64 {
    0.5
}

impl TransformConfig {
    /// Constructs the configured transform, validating its parameters.
    pub fn build(self) -> Result<TransformKind> {
        Ok(match self {
            TransformConfig::Scale { short_size } => TransformKind::Scale(Scale::new(short_size)?),
            TransformConfig::RandomCrop { target_size } => {
                TransformKind::RandomCrop(RandomCrop::new(target_size)?)
            }
            TransformConfig::CenterCrop { target_size } => {
                TransformKind::CenterCrop(CenterCrop::new(target_size)?)
            }
            TransformConfig::MultiScaleCrop {
                target_size,
                scales,
                max_distort,
                fix_crop,
                more_fix_crop,
            } => TransformKind::MultiScaleCrop(MultiScaleCrop::new(
                target_size,
                scales,
                max_distort,
                fix_crop,
                more_fix_crop,
            )?),
            TransformConfig::RandomFlip { p } => TransformKind::RandomFlip(RandomFlip::new(p)?),
            TransformConfig::Image2Array => TransformKind::Image2Array(Image2Array),
            TransformConfig::Normalization { mean, std } => {
                TransformKind::Normalization(Normalization::new(&mean, &std)?)
            }
        })
    }
}
