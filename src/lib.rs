//! Frame transform pipeline for video model input preparation.
//!
//! This crate implements the per-sample preprocessing chain applied to a
//! clip's decoded frames before they reach a model: short-side scaling,
//! random/center/multi-scale cropping, horizontal flipping, conversion to
//! a channel-first array, and per-channel normalization.
//!
//! Transforms are configured once and then applied to a [`Sample`] whose
//! `imgs` field carries either the frame list or, after [`Image2Array`],
//! the converted `(frames, channels, height, width)` array. Randomized
//! transforms draw a single decision per call and apply it to every frame
//! of the sample, and take the random source as an explicit argument so
//! runs are reproducible under a seeded generator.
//!
//! A pipeline can be assembled programmatically from transform values, or
//! from an ordered configuration list naming each stage:
//!
//! ```no_run
//! use frame_aug::{Pipeline, Sample};
//! use rand::SeedableRng;
//!
//! # fn decode_frames() -> Vec<image::RgbImage> { unimplemented!() }
//! # fn main() -> frame_aug::Result<()> {
//! let pipeline = Pipeline::from_json(
//!     r#"[
//!         {"name": "Scale", "short_size": 224},
//!         {"name": "CenterCrop", "target_size": 224},
//!         {"name": "Image2Array"},
//!         {"name": "Normalization", "mean": [0.5, 0.5, 0.5], "std": [0.5, 0.5, 0.5]}
//!     ]"#,
//! )?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let sample = pipeline.apply(Sample::from_images(decode_frames()), &mut rng)?;
//! let clip = sample.imgs.array()?;
//! assert_eq!(clip.shape()[1], 3);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod transforms;
pub mod utils;

pub use crate::core::config::TransformConfig;
pub use crate::core::errors::{Result, TransformError};
pub use crate::core::registry::{Pipeline, TransformKind};
pub use crate::core::sample::{Frames, Sample};
pub use crate::core::traits::FrameTransform;
pub use crate::transforms::{
    CenterCrop, CropRegion, Image2Array, MultiScaleCrop, Normalization, RandomCrop, RandomFlip,
    Scale,
};
