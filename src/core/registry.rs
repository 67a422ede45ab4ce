//! Enum-dispatched transform registry and the pipeline driver.
//!
//! Transform lookup happens once, at pipeline-build time: each
//! [`TransformConfig`] entry resolves to a [`TransformKind`] variant
//! holding the constructed transform. Application is a direct `match` —
//! no per-call name lookup, no trait objects, no downcasts — and adding
//! a transform forces every dispatch site to handle it explicitly.

use rand::RngCore;
use tracing::debug;

use crate::core::config::TransformConfig;
use crate::core::errors::{Result, TransformError};
use crate::core::sample::Sample;
use crate::core::traits::FrameTransform;
use crate::transforms::{
    CenterCrop, Image2Array, MultiScaleCrop, Normalization, RandomCrop, RandomFlip, Scale,
};

/// A constructed pipeline stage.
#[derive(Debug, Clone)]
pub enum TransformKind {
    /// Short-side resize.
    Scale(Scale),
    /// Shared random square crop.
    RandomCrop(RandomCrop),
    /// Centered square crop.
    CenterCrop(CenterCrop),
    /// Scale/aspect/position crop sampling.
    MultiScaleCrop(MultiScaleCrop),
    /// Shared horizontal mirror.
    RandomFlip(RandomFlip),
    /// Frame list to clip array conversion.
    Image2Array(Image2Array),
    /// Per-channel standardization.
    Normalization(Normalization),
}

impl TransformKind {
    /// The stage's registered name, as used in configuration entries.
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Scale(_) => "Scale",
            TransformKind::RandomCrop(_) => "RandomCrop",
            TransformKind::CenterCrop(_) => "CenterCrop",
            TransformKind::MultiScaleCrop(_) => "MultiScaleCrop",
            TransformKind::RandomFlip(_) => "RandomFlip",
            TransformKind::Image2Array(_) => "Image2Array",
            TransformKind::Normalization(_) => "Normalization",
        }
    }
}

impl FrameTransform for TransformKind {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        match self {
            TransformKind::Scale(t) => t.apply(sample, rng),
            TransformKind::RandomCrop(t) => t.apply(sample, rng),
            TransformKind::CenterCrop(t) => t.apply(sample, rng),
            TransformKind::MultiScaleCrop(t) => t.apply(sample, rng),
            TransformKind::RandomFlip(t) => t.apply(sample, rng),
            TransformKind::Image2Array(t) => t.apply(sample, rng),
            TransformKind::Normalization(t) => t.apply(sample, rng),
        }
    }
}

/// An ordered chain of transforms applied to each sample in sequence.
///
/// The chain is fixed at construction. Stage ordering is the config
/// author's responsibility; image-sequence transforms must precede the
/// conversion stage, which must precede normalization, and a misordered
/// chain fails with [`TransformError::InvalidInput`] at the stage that
/// receives the wrong representation.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<TransformKind>,
}

impl Pipeline {
    /// Creates a pipeline from already-constructed stages.
    pub fn new(stages: Vec<TransformKind>) -> Self {
        Self { stages }
    }

    /// Builds a pipeline from an ordered configuration list.
    pub fn from_configs(configs: Vec<TransformConfig>) -> Result<Self> {
        let stages = configs
            .into_iter()
            .map(TransformConfig::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { stages })
    }

    /// Builds a pipeline from a JSON configuration list.
    pub fn from_json(json: &str) -> Result<Self> {
        let configs: Vec<TransformConfig> = serde_json::from_str(json)
            .map_err(|e| TransformError::invalid_configuration(e.to_string()))?;
        Self::from_configs(configs)
    }

    /// Number of stages in the chain.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Threads the sample through every stage in order.
    pub fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample> {
        for stage in &self.stages {
            debug!(stage = stage.name(), "applying transform");
            sample = stage.apply(sample, rng)?;
        }
        Ok(sample)
    }
}
