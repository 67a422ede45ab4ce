//! Combined scale, aspect, and position crop sampling.

use image::imageops::{self, FilterType};
use itertools::Itertools;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::core::errors::{Result, TransformError};
use crate::core::sample::{Frames, Sample};
use crate::core::traits::FrameTransform;
use crate::transforms::crop::CropRegion;
use crate::transforms::reference_dimensions;

/// Default scale ladder applied to the shorter image side.
pub const DEFAULT_SCALES: &[f64] = &[1.0, 0.875, 0.75, 0.66];

/// Samples one crop geometry per call from a set of scale/aspect
/// candidates, crops every frame identically, and resizes the result
/// back to a fixed square.
///
/// Candidate crop sizes come from multiplying the shorter image side by
/// each entry of `scales`, truncated to whole pixels; sizes within 3 px
/// of `target_size` snap to it exactly. The candidate pair
/// `(crop_w[j], crop_h[i])` is admissible when `|i - j| <= max_distort`,
/// which bounds how far the sampled aspect ratio can drift from square.
/// Index pairs that produce equal sizes stay in the list as duplicates;
/// they weight the sampling distribution toward those sizes.
///
/// With `fix_crop` the offset is drawn from a fixed grid of positions
/// built from quarter steps of the leftover margin (5 positions, or 13
/// with `more_fix_crop`); otherwise it is drawn uniformly over the valid
/// range. The cropped frames are always resized to
/// `target_size × target_size` with bilinear interpolation, even when the
/// sampled crop already has the target dimensions.
#[derive(Debug, Clone)]
pub struct MultiScaleCrop {
    target_size: u32,
    scales: Vec<f64>,
    max_distort: usize,
    fix_crop: bool,
    more_fix_crop: bool,
}

impl MultiScaleCrop {
    /// Creates a new multi-scale crop transform.
    ///
    /// # Errors
    ///
    /// Returns an error if `target_size` is zero, `scales` is empty
    /// (no candidate pair could ever be admissible), or any scale is
    /// non-finite or non-positive.
    pub fn new(
        target_size: u32,
        scales: Vec<f64>,
        max_distort: usize,
        fix_crop: bool,
        more_fix_crop: bool,
    ) -> Result<Self> {
        if target_size == 0 {
            return Err(TransformError::invalid_configuration(
                "target_size must be positive",
            ));
        }
        if scales.is_empty() {
            return Err(TransformError::EmptyCandidateSet {
                num_scales: 0,
                max_distort,
            });
        }
        if scales.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(TransformError::invalid_configuration(format!(
                "scales must be finite and positive, got {scales:?}"
            )));
        }
        Ok(Self {
            target_size,
            scales,
            max_distort,
            fix_crop,
            more_fix_crop,
        })
    }

    /// Multi-scale crop with the default scale ladder, `max_distort` of 1,
    /// and the extended fixed offset grid.
    pub fn with_defaults(target_size: u32) -> Result<Self> {
        Self::new(target_size, DEFAULT_SCALES.to_vec(), 1, true, true)
    }

    /// Samples the crop geometry shared by every frame of the sample.
    fn sample_crop_region(
        &self,
        image_w: u32,
        image_h: u32,
        rng: &mut dyn RngCore,
    ) -> Result<CropRegion> {
        let base = image_w.min(image_h) as f64;
        let target = self.target_size as i64;

        // Candidates within 3 px of the target snap to it exactly, so the
        // final resize is an identity for near-target crops.
        let candidates: Vec<i64> = self
            .scales
            .iter()
            .map(|s| {
                let size = (base * s) as i64;
                if (size - target).abs() < 3 { target } else { size }
            })
            .collect();

        // The same candidate list serves both axes; the index distance
        // between the height and width picks bounds the aspect distortion.
        let pairs: Vec<(i64, i64)> = candidates
            .iter()
            .enumerate()
            .cartesian_product(candidates.iter().enumerate())
            .filter(|((i, _), (j, _))| i.abs_diff(*j) <= self.max_distort)
            .map(|((_, &h), (_, &w))| (w, h))
            .collect();
        if pairs.is_empty() {
            return Err(TransformError::EmptyCandidateSet {
                num_scales: self.scales.len(),
                max_distort: self.max_distort,
            });
        }

        let (crop_w, crop_h) = pairs[rng.random_range(0..pairs.len())];
        if crop_w > image_w as i64 || crop_h > image_h as i64 {
            return Err(TransformError::ImageTooSmall {
                width: image_w,
                height: image_h,
                target: crop_w.max(crop_h) as u32,
            });
        }
        let (crop_w, crop_h) = (crop_w as u32, crop_h as u32);

        let (x, y) = if !self.fix_crop {
            (
                rng.random_range(0..=image_w - crop_w),
                rng.random_range(0..=image_h - crop_h),
            )
        } else {
            let w_step = (image_w - crop_w) as f64 / 4.0;
            let h_step = (image_h - crop_h) as f64 / 4.0;

            let mut offsets: Vec<(f64, f64)> = Vec::with_capacity(13);
            offsets.push((0.0, 0.0)); // upper left
            if w_step != 0.0 {
                offsets.push((4.0 * w_step, 0.0)); // upper right
            }
            if h_step != 0.0 {
                offsets.push((0.0, 4.0 * h_step)); // lower left
            }
            if h_step != 0.0 && w_step != 0.0 {
                offsets.push((4.0 * w_step, 4.0 * h_step)); // lower right
            }
            if h_step != 0.0 || w_step != 0.0 {
                offsets.push((2.0 * w_step, 2.0 * h_step)); // center
            }

            if self.more_fix_crop {
                offsets.push((0.0, 2.0 * h_step)); // center left
                offsets.push((4.0 * w_step, 2.0 * h_step)); // center right
                offsets.push((2.0 * w_step, 4.0 * h_step)); // lower center
                offsets.push((2.0 * w_step, 0.0)); // upper center
                offsets.push((w_step, h_step)); // upper left quarter
                offsets.push((3.0 * w_step, h_step)); // upper right quarter
                offsets.push((w_step, 3.0 * h_step)); // lower left quarter
                offsets.push((3.0 * w_step, 3.0 * h_step)); // lower right quarter
            }

            let (ox, oy) = offsets[rng.random_range(0..offsets.len())];
            // Fractional grid offsets truncate to whole pixels.
            (ox as u32, oy as u32)
        };

        Ok(CropRegion {
            width: crop_w,
            height: crop_h,
            x,
            y,
        })
    }
}

impl FrameTransform for MultiScaleCrop {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        let Sample { imgs, meta } = sample;
        let frames = imgs.into_images()?;
        let (image_w, image_h) = reference_dimensions(&frames)?;
        let region = self.sample_crop_region(image_w, image_h, rng)?;
        debug!(?region, "sampled crop geometry");

        let out: Vec<_> = region
            .apply_to(&frames)
            .iter()
            .map(|img| imageops::resize(img, self.target_size, self.target_size, FilterType::Triangle))
            .collect();

        Ok(Sample {
            imgs: Frames::Images(out),
            meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn gradient_frame(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    #[test]
    fn default_candidate_set_on_256_is_admissible() {
        let crop = MultiScaleCrop::with_defaults(224).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        // base 256: candidates [256, 224, 192, 168]; 224 snaps exactly
        for _ in 0..64 {
            let region = crop.sample_crop_region(256, 256, &mut rng).unwrap();
            let candidates = [256, 224, 192, 168];
            let wi = candidates.iter().position(|&c| c == region.width).unwrap();
            let hi = candidates.iter().position(|&c| c == region.height).unwrap();
            assert!(wi.abs_diff(hi) <= 1, "pair ({}, {})", region.width, region.height);
            assert!(region.x + region.width <= 256);
            assert!(region.y + region.height <= 256);
        }
    }

    #[test]
    fn output_is_always_the_target_square() {
        let crop = MultiScaleCrop::with_defaults(224).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..16 {
            let sample = Sample::from_images(vec![gradient_frame(256, 256)]);
            let out = crop.apply(sample, &mut rng).unwrap();
            for img in out.imgs.images().unwrap() {
                assert_eq!(img.dimensions(), (224, 224));
            }
        }
    }

    #[test]
    fn free_random_offsets_stay_in_bounds() {
        let crop =
            MultiScaleCrop::new(112, vec![1.0, 0.875, 0.75], 1, false, false).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..64 {
            let region = crop.sample_crop_region(200, 160, &mut rng).unwrap();
            assert!(region.x + region.width <= 200);
            assert!(region.y + region.height <= 160);
        }
        let sample = Sample::from_images(vec![gradient_frame(200, 160)]);
        let out = crop.apply(sample, &mut rng).unwrap();
        assert_eq!(out.imgs.images().unwrap()[0].dimensions(), (112, 112));
    }

    #[test]
    fn all_frames_share_the_sampled_geometry() {
        let crop = MultiScaleCrop::with_defaults(64).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let frames = vec![gradient_frame(128, 96); 3];
        let out = crop.apply(Sample::from_images(frames), &mut rng).unwrap();
        let imgs = out.imgs.images().unwrap();
        for img in &imgs[1..] {
            assert_eq!(img.as_raw(), imgs[0].as_raw());
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_output() {
        let crop = MultiScaleCrop::with_defaults(64).unwrap();
        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let sample = Sample::from_images(vec![gradient_frame(160, 120)]);
            crop.apply(sample, &mut rng)
                .unwrap()
                .imgs
                .into_images()
                .unwrap()
        };
        assert_eq!(run(9)[0].as_raw(), run(9)[0].as_raw());
    }

    #[test]
    fn empty_scales_fail_at_construction() {
        let err = MultiScaleCrop::new(224, vec![], 1, true, true).unwrap_err();
        assert!(matches!(err, TransformError::EmptyCandidateSet { .. }));
    }

    #[test]
    fn non_positive_scales_are_rejected() {
        assert!(MultiScaleCrop::new(224, vec![1.0, -0.5], 1, true, true).is_err());
        assert!(MultiScaleCrop::new(224, vec![f64::NAN], 1, true, true).is_err());
    }

    #[test]
    fn oversized_scales_report_small_image() {
        let crop = MultiScaleCrop::new(64, vec![2.0], 0, true, true).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = crop
            .apply(Sample::from_images(vec![gradient_frame(100, 100)]), &mut rng)
            .unwrap_err();
        assert!(matches!(err, TransformError::ImageTooSmall { .. }));
    }
}
