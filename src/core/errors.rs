//! Error types for the frame transform pipeline.
//!
//! All configuration and apply-time failures surface as [`TransformError`].
//! Transforms never retry internally; errors propagate to the pipeline
//! caller, which owns the sample-level skip/log/abort policy.

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Errors that can occur while configuring or applying frame transforms.
#[derive(Debug, Error)]
pub enum TransformError {
    /// An input frame is smaller than the requested crop target.
    #[error(
        "image width ({width}) and height ({height}) should be larger than crop size ({target})"
    )]
    ImageTooSmall {
        /// Width of the offending frame.
        width: u32,
        /// Height of the offending frame.
        height: u32,
        /// The requested square crop side.
        target: u32,
    },

    /// A transform was constructed with invalid parameters.
    #[error("configuration: {message}")]
    InvalidConfiguration {
        /// A message describing the configuration error.
        message: String,
    },

    /// A scale/max_distort combination admits no crop candidate pair.
    ///
    /// This is a configuration error, not a per-sample condition: the
    /// admissible set depends only on the scale list and the distortion
    /// bound, never on the image being processed.
    #[error("no admissible crop pair: {num_scales} scales with max_distort {max_distort}")]
    EmptyCandidateSet {
        /// Number of configured scales.
        num_scales: usize,
        /// The configured index-distance bound.
        max_distort: usize,
    },

    /// A stage received malformed input, e.g. the wrong `imgs`
    /// representation for its position in the pipeline or a ragged frame
    /// list.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Shape error bubbled up from array construction.
    #[error("tensor shape")]
    Shape(#[from] ndarray::ShapeError),
}

impl TransformError {
    /// Creates an [`TransformError::InvalidConfiguration`] from any message.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Creates an [`TransformError::InvalidInput`] from any message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
