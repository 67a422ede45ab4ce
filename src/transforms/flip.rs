//! Shared horizontal frame mirroring.

use image::imageops;
use rand::{Rng, RngCore};

use crate::core::errors::{Result, TransformError};
use crate::core::sample::{Frames, Sample};
use crate::core::traits::FrameTransform;

/// Mirrors every frame horizontally with probability `p`.
///
/// One draw decides the whole sample; frames are never flipped
/// independently of each other.
#[derive(Debug, Clone)]
pub struct RandomFlip {
    p: f64,
}

impl RandomFlip {
    /// Creates a new flip transform.
    pub fn new(p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(TransformError::invalid_configuration(format!(
                "flip probability must be in [0.0, 1.0], got {p}"
            )));
        }
        Ok(Self { p })
    }
}

impl FrameTransform for RandomFlip {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        let Sample { imgs, meta } = sample;
        let frames = imgs.into_images()?;

        let v: f64 = rng.random();
        let out = if v < self.p {
            frames
                .iter()
                .map(|img| imageops::flip_horizontal(img))
                .collect()
        } else {
            frames
        };

        Ok(Sample {
            imgs: Frames::Images(out),
            meta,
        })
    }
}
