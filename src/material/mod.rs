//! Materials decide what happens to light at surfaces and inside volumes.
//!
//! Scattering surfaces implement [`ContinuousBsdf`]; the shading engine in
//! [`bsdf`] turns any such BSDF into a [`Material`] by importance sampling
//! outgoing directions.

pub mod bsdf;
mod lambert;
mod null;

pub use bsdf::{ContinuousBsdf, SamplingStrategy, ScatterSample, ShadingContext};
pub use lambert::Lambert;
pub use null::{continuation_ray, NullSurface, NullVolume};

use crate::{
    error::Result,
    interaction::{SurfaceInteraction, VolumeSegment},
    ray::Ray,
    sampler::Sampler,
    scene::World,
    spectra::Spectrum,
};

pub trait Material {
    /// Radiance leaving the surface back along `ray`.
    fn evaluate_surface(
        &self,
        world: &dyn World,
        ray: &Ray,
        interaction: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Result<Spectrum>;

    /// Radiance at the start of the segment, given the radiance `spectrum`
    /// arriving at its end.
    fn evaluate_volume(
        &self,
        spectrum: Spectrum,
        world: &dyn World,
        ray: &Ray,
        segment: &VolumeSegment,
        sampler: &mut Sampler,
    ) -> Result<Spectrum>;
}
