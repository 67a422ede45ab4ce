//! Short-side frame scaling.

use image::imageops::{self, FilterType};
use rand::RngCore;

use crate::core::errors::{Result, TransformError};
use crate::core::sample::{Frames, Sample};
use crate::core::traits::FrameTransform;

/// Resizes every frame so its shorter side matches `short_size`.
///
/// Frames whose shorter side already equals the target pass through
/// untouched. All other frames are resized with bilinear interpolation
/// to a fixed 4:3 rectangle: the shorter side becomes `short_size` and
/// the longer side `short_size * 4 / 3` truncated toward zero, replacing
/// the original aspect ratio rather than preserving it.
#[derive(Debug, Clone)]
pub struct Scale {
    short_size: u32,
}

impl Scale {
    /// Creates a new scale transform.
    pub fn new(short_size: u32) -> Result<Self> {
        if short_size == 0 {
            return Err(TransformError::invalid_configuration(
                "short_size must be positive",
            ));
        }
        Ok(Self { short_size })
    }
}

impl FrameTransform for Scale {
    fn apply(&self, sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        let Sample { imgs, meta } = sample;
        let frames = imgs.into_images()?;
        let long_size = (self.short_size as f64 * 4.0 / 3.0) as u32;

        let mut resized = Vec::with_capacity(frames.len());
        for img in frames {
            let (w, h) = img.dimensions();
            if (w <= h && w == self.short_size) || (h <= w && h == self.short_size) {
                resized.push(img);
            } else if w < h {
                resized.push(imageops::resize(
                    &img,
                    self.short_size,
                    long_size,
                    FilterType::Triangle,
                ));
            } else {
                resized.push(imageops::resize(
                    &img,
                    long_size,
                    self.short_size,
                    FilterType::Triangle,
                ));
            }
        }

        Ok(Sample {
            imgs: Frames::Images(resized),
            meta,
        })
    }
}
