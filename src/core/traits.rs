//! The transform seam shared by every pipeline stage.

use rand::RngCore;

use crate::core::errors::Result;
use crate::core::sample::Sample;

/// A configured, stateless-per-call frame transform.
///
/// Implementations are pure functions of their construction-time
/// parameters, the input sample, and the supplied random source; they
/// hold no cross-call state. Randomized transforms draw one decision per
/// call and apply it uniformly to every frame of the sample — never
/// per-frame independent randomness. Deterministic transforms ignore
/// `rng`.
///
/// The generator is an explicit argument so callers control determinism.
/// One generator must not be shared across concurrent pipeline
/// invocations; workers parallelizing over samples each need their own
/// stream.
pub trait FrameTransform: Send + Sync {
    /// Applies the transform, returning the sample with `imgs` replaced.
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<Sample>;
}
