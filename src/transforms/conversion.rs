//! Frame-list to clip-array conversion.

use ndarray::Array4;
use rand::RngCore;

use crate::core::errors::{Result, TransformError};
use crate::core::sample::{Frames, Sample};
use crate::core::traits::FrameTransform;
use crate::transforms::reference_dimensions;

/// Converts the frame list into a single `(N, 3, H, W)` f32 array.
///
/// Pixel intensities are copied as-is, without scaling; only the axis
/// order changes, from the frames' `(N, H, W, 3)` layout to
/// channel-first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image2Array;

impl FrameTransform for Image2Array {
    fn apply(&self, sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        let Sample { imgs, meta } = sample;
        let frames = imgs.into_images()?;
        let (w, h) = reference_dimensions(&frames)?;
        for (idx, img) in frames.iter().enumerate() {
            let (fw, fh) = img.dimensions();
            if (fw, fh) != (w, h) {
                return Err(TransformError::invalid_input(format!(
                    "all frames must have the same dimensions: frame 0 is {w}x{h}, frame {idx} is {fw}x{fh}"
                )));
            }
        }

        let (n, height, width) = (frames.len(), h as usize, w as usize);
        let mut data = vec![0.0f32; n * 3 * height * width];
        for (f, img) in frames.iter().enumerate() {
            let raw = img.as_raw();
            for y in 0..height {
                for x in 0..width {
                    let src = (y * width + x) * 3;
                    for c in 0..3 {
                        data[((f * 3 + c) * height + y) * width + x] = raw[src + c] as f32;
                    }
                }
            }
        }

        let array = Array4::from_shape_vec((n, 3, height, width), data)?;
        Ok(Sample {
            imgs: Frames::Array(array),
            meta,
        })
    }
}
