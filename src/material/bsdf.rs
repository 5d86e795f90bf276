//! The shading engine for continuous BSDFs.
//!
//! Outgoing directions are drawn either from the BSDF itself or, when the ray
//! asks for it and the scene has important primitives, from the scene's
//! important-direction distribution. The two are combined as a one-sample
//! mixture: the estimate is divided by
//! `w * pdf_important + (1 - w) * pdf_bsdf`, with both densities evaluated
//! for every sample.

use log::trace;

use crate::{
    error::Result,
    frame::Frame,
    interaction::{SurfaceInteraction, VolumeSegment},
    ray::Ray,
    sampler::{Sampler, SamplerI},
    sampling::{one_sample_mis_pdf, sample_bernoulli},
    scene::World,
    spectra::Spectrum,
    transform::Transform,
    vecmath::{Normalize, Point3f, Vector3f},
    Float,
};

use super::Material;

/// A material whose scattering is described by a BSDF over continuous
/// directions. Directions are in surface space, where the normal is +z, and
/// point away from the surface.
pub trait ContinuousBsdf {
    /// Draws an outgoing direction. `exiting` is true when the ray hit the
    /// back face.
    fn sample(&self, s_incoming: &Vector3f, exiting: bool, sampler: &mut Sampler) -> Vector3f;

    /// Density of `sample` at `s_outgoing`, per unit solid angle.
    ///
    /// Must be non-zero wherever `sample` can return a direction.
    fn pdf(&self, s_incoming: &Vector3f, s_outgoing: &Vector3f, exiting: bool) -> Float;

    /// BSDF-weighted radiance arriving from `s_outgoing`, typically found by
    /// tracing a daughter ray. Not divided by any pdf.
    fn evaluate_shading(
        &self,
        world: &dyn World,
        ray: &Ray,
        s_incoming: &Vector3f,
        s_outgoing: &Vector3f,
        ctx: &ShadingContext,
        sampler: &mut Sampler,
    ) -> Result<Spectrum>;

    /// Volumes of BSDF materials are transparent unless overridden.
    fn evaluate_volume(
        &self,
        spectrum: Spectrum,
        _world: &dyn World,
        _ray: &Ray,
        _segment: &VolumeSegment,
        _sampler: &mut Sampler,
    ) -> Result<Spectrum> {
        Ok(spectrum)
    }
}

/// World-space data a BSDF needs to spawn daughter rays.
#[derive(Debug, Clone)]
pub struct ShadingContext {
    pub hit_point: Point3f,
    /// Launch point for rays leaving on the incoming side.
    pub reflection_origin: Point3f,
    /// Launch point for rays crossing the surface.
    pub transmission_origin: Point3f,
    /// True if the ray hit the back face.
    pub back_face: bool,
    pub world_to_surface: Transform,
    pub surface_to_world: Transform,
}

impl ShadingContext {
    pub fn new(interaction: &SurfaceInteraction) -> ShadingContext {
        let frame = Frame::from_normal(&interaction.normal);
        let (primitive_to_surface, surface_to_primitive) = frame.transforms();
        let to_world = &interaction.primitive_to_world;

        let (reflection_origin, transmission_origin) = if interaction.exiting {
            (interaction.inside_point, interaction.outside_point)
        } else {
            (interaction.outside_point, interaction.inside_point)
        };

        ShadingContext {
            hit_point: to_world.apply(&interaction.hit_point),
            reflection_origin: to_world.apply(&reflection_origin),
            transmission_origin: to_world.apply(&transmission_origin),
            back_face: interaction.exiting,
            world_to_surface: primitive_to_surface * interaction.world_to_primitive,
            surface_to_world: interaction.primitive_to_world * surface_to_primitive,
        }
    }

    /// Surface-space direction back toward the ray origin.
    pub fn incoming(&self, ray: &Ray) -> Vector3f {
        -self.world_to_surface.apply(&ray.direction).normalize()
    }
}

/// Which distribution produced a scattered direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStrategy {
    Bsdf,
    Important,
}

#[derive(Debug, Clone, Copy)]
pub struct ScatterSample {
    pub s_outgoing: Vector3f,
    pub w_outgoing: Vector3f,
    /// Density of the combined distribution at this direction.
    pub pdf: Float,
    pub strategy: SamplingStrategy,
}

/// Draws an outgoing direction and its combined pdf.
pub fn sample_outgoing<B: ContinuousBsdf + ?Sized>(
    bsdf: &B,
    world: &dyn World,
    ray: &Ray,
    s_incoming: &Vector3f,
    ctx: &ShadingContext,
    sampler: &mut Sampler,
) -> ScatterSample {
    if !(ray.importance_sampling() && world.has_important_primitives()) {
        let s_outgoing = bsdf.sample(s_incoming, ctx.back_face, sampler);
        return ScatterSample {
            s_outgoing,
            w_outgoing: ctx.surface_to_world.apply(&s_outgoing).normalize(),
            pdf: bsdf.pdf(s_incoming, &s_outgoing, ctx.back_face),
            strategy: SamplingStrategy::Bsdf,
        };
    }

    let weight = ray.important_path_weight();
    let (strategy, s_outgoing, w_outgoing) = if sample_bernoulli(sampler.get_1d(), weight) {
        let w_outgoing = world
            .important_direction_sample(&ctx.hit_point, sampler)
            .normalize();
        let s_outgoing = ctx.world_to_surface.apply(&w_outgoing).normalize();
        (SamplingStrategy::Important, s_outgoing, w_outgoing)
    } else {
        let s_outgoing = bsdf.sample(s_incoming, ctx.back_face, sampler);
        let w_outgoing = ctx.surface_to_world.apply(&s_outgoing).normalize();
        (SamplingStrategy::Bsdf, s_outgoing, w_outgoing)
    };

    let pdf_important = world.important_direction_pdf(&ctx.hit_point, &w_outgoing);
    let pdf_bsdf = bsdf.pdf(s_incoming, &s_outgoing, ctx.back_face);
    trace!(
        "{:?} sample: pdf_important {} pdf_bsdf {}",
        strategy,
        pdf_important,
        pdf_bsdf
    );

    ScatterSample {
        s_outgoing,
        w_outgoing,
        pdf: one_sample_mis_pdf(weight, pdf_important, pdf_bsdf),
        strategy,
    }
}

/// Monte-Carlo estimate of the radiance leaving a surface along the reversed
/// ray direction.
pub fn evaluate_surface<B: ContinuousBsdf + ?Sized>(
    bsdf: &B,
    world: &dyn World,
    ray: &Ray,
    interaction: &SurfaceInteraction,
    sampler: &mut Sampler,
) -> Result<Spectrum> {
    let ctx = ShadingContext::new(interaction);
    let s_incoming = ctx.incoming(ray);
    let sample = sample_outgoing(bsdf, world, ray, &s_incoming, &ctx, sampler);

    let mut spectrum =
        bsdf.evaluate_shading(world, ray, &s_incoming, &sample.s_outgoing, &ctx, sampler)?;
    // A zero pdf here is a fault in the BSDF's sample/pdf pair.
    debug_assert!(sample.pdf > 0.0, "zero pdf for {:?}", sample);
    spectrum.div_scalar(sample.pdf);
    Ok(spectrum)
}

impl<B: ContinuousBsdf> Material for B {
    fn evaluate_surface(
        &self,
        world: &dyn World,
        ray: &Ray,
        interaction: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Result<Spectrum> {
        evaluate_surface(self, world, ray, interaction, sampler)
    }

    fn evaluate_volume(
        &self,
        spectrum: Spectrum,
        world: &dyn World,
        ray: &Ray,
        segment: &VolumeSegment,
        sampler: &mut Sampler,
    ) -> Result<Spectrum> {
        ContinuousBsdf::evaluate_volume(self, spectrum, world, ray, segment, sampler)
    }
}
