//! Random and center square crops.

use image::{RgbImage, imageops};
use rand::{Rng, RngCore};

use crate::core::errors::{Result, TransformError};
use crate::core::sample::{Frames, Sample};
use crate::core::traits::FrameTransform;
use crate::transforms::reference_dimensions;

/// Crop geometry shared by every frame of a sample.
///
/// Computed once per call from one random (or derived) decision, then
/// applied to all frames identically so the clip stays temporally
/// coherent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    /// Width of the crop rectangle.
    pub width: u32,
    /// Height of the crop rectangle.
    pub height: u32,
    /// Left edge of the crop rectangle.
    pub x: u32,
    /// Top edge of the crop rectangle.
    pub y: u32,
}

impl CropRegion {
    /// Crops every frame at this region, producing new images.
    pub(crate) fn apply_to(&self, frames: &[RgbImage]) -> Vec<RgbImage> {
        frames
            .iter()
            .map(|img| imageops::crop_imm(img, self.x, self.y, self.width, self.height).to_image())
            .collect()
    }
}

fn check_crop_fits(width: u32, height: u32, target: u32) -> Result<()> {
    if width < target || height < target {
        return Err(TransformError::ImageTooSmall {
            width,
            height,
            target,
        });
    }
    Ok(())
}

/// Crops a random `target_size` square at an offset shared by all frames.
///
/// The offset is drawn once per call, with inclusive bounds, from the
/// first frame's dimensions. Frames that already have exactly the target
/// dimensions are passed through untouched.
#[derive(Debug, Clone)]
pub struct RandomCrop {
    target_size: u32,
}

impl RandomCrop {
    /// Creates a new random crop transform.
    pub fn new(target_size: u32) -> Result<Self> {
        if target_size == 0 {
            return Err(TransformError::invalid_configuration(
                "target_size must be positive",
            ));
        }
        Ok(Self { target_size })
    }
}

impl FrameTransform for RandomCrop {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        let Sample { imgs, meta } = sample;
        let frames = imgs.into_images()?;
        let (w, h) = reference_dimensions(&frames)?;
        let target = self.target_size;
        check_crop_fits(w, h, target)?;

        let x1 = rng.random_range(0..=w - target);
        let y1 = rng.random_range(0..=h - target);

        let mut cropped = Vec::with_capacity(frames.len());
        for img in frames {
            if w == target && h == target {
                cropped.push(img);
            } else {
                cropped.push(imageops::crop_imm(&img, x1, y1, target, target).to_image());
            }
        }

        Ok(Sample {
            imgs: Frames::Images(cropped),
            meta,
        })
    }
}

/// Crops a centered `target_size` square from each frame.
///
/// Purely positional: each frame is handled independently with offsets
/// `round((w - target) / 2)` and `round((h - target) / 2)`.
#[derive(Debug, Clone)]
pub struct CenterCrop {
    target_size: u32,
}

impl CenterCrop {
    /// Creates a new center crop transform.
    pub fn new(target_size: u32) -> Result<Self> {
        if target_size == 0 {
            return Err(TransformError::invalid_configuration(
                "target_size must be positive",
            ));
        }
        Ok(Self { target_size })
    }
}

impl FrameTransform for CenterCrop {
    fn apply(&self, sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        let Sample { imgs, meta } = sample;
        let frames = imgs.into_images()?;
        let target = self.target_size;

        let mut cropped = Vec::with_capacity(frames.len());
        for img in &frames {
            let (w, h) = img.dimensions();
            check_crop_fits(w, h, target)?;
            let x1 = ((w - target) as f64 / 2.0).round() as u32;
            let y1 = ((h - target) as f64 / 2.0).round() as u32;
            cropped.push(imageops::crop_imm(img, x1, y1, target, target).to_image());
        }

        Ok(Sample {
            imgs: Frames::Images(cropped),
            meta,
        })
    }
}
