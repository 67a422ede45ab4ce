//! Per-channel clip normalization.

use ndarray::s;
use rand::RngCore;

use crate::core::errors::{Result, TransformError};
use crate::core::sample::{Frames, Sample};
use crate::core::traits::FrameTransform;

/// Scales pixel values into `[0, 1]` and standardizes each color channel.
///
/// The `(N, 3, H, W)` array produced by the conversion stage is divided
/// by 255, then each channel has its mean subtracted and is divided by
/// its standard deviation, broadcast over frames and spatial dimensions.
/// The arithmetic runs in place on the array the sample owns.
#[derive(Debug, Clone)]
pub struct Normalization {
    mean: [f32; 3],
    std: [f32; 3],
}

impl Normalization {
    /// Creates a new normalization transform from per-channel statistics.
    ///
    /// # Errors
    ///
    /// Returns an error unless `mean` and `std` each hold exactly 3
    /// finite values and every std entry is non-zero.
    pub fn new(mean: &[f32], std: &[f32]) -> Result<Self> {
        let mean = per_channel(mean, "mean")?;
        let std = per_channel(std, "std")?;
        if std.iter().any(|&s| s == 0.0) {
            return Err(TransformError::invalid_configuration(
                "std must be non-zero in every channel",
            ));
        }
        Ok(Self { mean, std })
    }
}

fn per_channel(values: &[f32], name: &str) -> Result<[f32; 3]> {
    let channels: [f32; 3] = values.try_into().map_err(|_| {
        TransformError::invalid_configuration(format!(
            "{name} must have exactly 3 elements, got {}",
            values.len()
        ))
    })?;
    if channels.iter().any(|v| !v.is_finite()) {
        return Err(TransformError::invalid_configuration(format!(
            "{name} must contain only finite values, got {channels:?}"
        )));
    }
    Ok(channels)
}

impl FrameTransform for Normalization {
    fn apply(&self, sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample> {
        let Sample { imgs, meta } = sample;
        let mut array = imgs.into_array()?;
        if array.shape()[1] != 3 {
            return Err(TransformError::invalid_input(format!(
                "expected 3 channels, got {}",
                array.shape()[1]
            )));
        }

        array.mapv_inplace(|v| v / 255.0);
        for c in 0..3 {
            let mut channel = array.slice_mut(s![.., c, .., ..]);
            channel -= self.mean[c];
            channel /= self.std[c];
        }

        Ok(Sample {
            imgs: Frames::Array(array),
            meta,
        })
    }
}
