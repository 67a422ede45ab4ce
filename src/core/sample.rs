//! The record threaded through a transform pipeline.

use std::collections::HashMap;

use image::RgbImage;
use ndarray::Array4;

use crate::core::errors::{Result, TransformError};

/// The `imgs` payload of a [`Sample`].
///
/// A clip starts as a list of equal-sized RGB frames and becomes a single
/// `(frames, channels, height, width)` f32 array once the conversion
/// stage has run. Accessors convert between the two with a typed error
/// when a stage receives the wrong representation, so a misordered
/// pipeline fails loudly at the offending stage instead of corrupting
/// data.
#[derive(Debug, Clone)]
pub enum Frames {
    /// Decoded frames, one RGB image per sampled frame.
    Images(Vec<RgbImage>),
    /// Converted clip array in `(N, 3, H, W)` layout.
    Array(Array4<f32>),
}

impl Frames {
    /// Short name of the current representation, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Frames::Images(_) => "images",
            Frames::Array(_) => "array",
        }
    }

    /// Borrows the frame list.
    pub fn images(&self) -> Result<&[RgbImage]> {
        match self {
            Frames::Images(imgs) => Ok(imgs),
            other => Err(TransformError::invalid_input(format!(
                "expected image frames, got {}",
                other.kind()
            ))),
        }
    }

    /// Consumes the payload and returns the frame list.
    pub fn into_images(self) -> Result<Vec<RgbImage>> {
        match self {
            Frames::Images(imgs) => Ok(imgs),
            other => Err(TransformError::invalid_input(format!(
                "expected image frames, got {}",
                other.kind()
            ))),
        }
    }

    /// Borrows the converted clip array.
    pub fn array(&self) -> Result<&Array4<f32>> {
        match self {
            Frames::Array(array) => Ok(array),
            other => Err(TransformError::invalid_input(format!(
                "expected clip array, got {}",
                other.kind()
            ))),
        }
    }

    /// Consumes the payload and returns the converted clip array.
    pub fn into_array(self) -> Result<Array4<f32>> {
        match self {
            Frames::Array(array) => Ok(array),
            other => Err(TransformError::invalid_input(format!(
                "expected clip array, got {}",
                other.kind()
            ))),
        }
    }
}

/// One training sample flowing through the pipeline.
///
/// Transforms read and replace `imgs`. Every other field travels in
/// `meta`, an open side channel the pipeline never interprets, alters,
/// or drops.
#[derive(Debug, Clone)]
pub struct Sample {
    /// The clip's frames, or their converted array form.
    pub imgs: Frames,
    /// Opaque pass-through data owned by the caller.
    pub meta: HashMap<String, serde_json::Value>,
}

impl Sample {
    /// Creates a sample from decoded frames with no attached metadata.
    pub fn from_images(imgs: Vec<RgbImage>) -> Self {
        Self {
            imgs: Frames::Images(imgs),
            meta: HashMap::new(),
        }
    }

    /// Creates a sample directly from a converted clip array.
    pub fn from_array(array: Array4<f32>) -> Self {
        Self {
            imgs: Frames::Array(array),
            meta: HashMap::new(),
        }
    }

    /// Attaches a pass-through metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }
}
