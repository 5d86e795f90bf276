use crate::{
    error::Result,
    interaction::{SurfaceInteraction, VolumeSegment},
    ray::Ray,
    sampler::Sampler,
    scene::World,
    spectra::Spectrum,
};

use super::Material;

/// The ray that carries on through a non-scattering surface.
///
/// It starts just beyond the surface on the far side and keeps the incident
/// direction. Crossing the surface does not count as a scattering event, so
/// its depth equals the incident ray's.
pub fn continuation_ray(ray: &Ray, interaction: &SurfaceInteraction) -> Ray {
    let origin = if interaction.exiting {
        interaction.outside_point
    } else {
        interaction.inside_point
    };
    let mut daughter = ray.spawn_daughter(
        interaction.primitive_to_world.apply(&origin),
        ray.direction,
    );
    daughter.depth -= 1;
    daughter
}

fn pass_through(
    world: &dyn World,
    ray: &Ray,
    interaction: &SurfaceInteraction,
    sampler: &mut Sampler,
) -> Result<Spectrum> {
    continuation_ray(ray, interaction).trace(world, true, sampler)
}

/// A surface that light passes straight through. The volume behind it is
/// described by `V`.
#[derive(Debug, Clone, Default)]
pub struct NullSurface<V = NullVolume> {
    volume: V,
}

impl<V> NullSurface<V> {
    pub fn new(volume: V) -> NullSurface<V> {
        NullSurface { volume }
    }

    pub fn volume(&self) -> &V {
        &self.volume
    }
}

impl<V: Material> Material for NullSurface<V> {
    fn evaluate_surface(
        &self,
        world: &dyn World,
        ray: &Ray,
        interaction: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Result<Spectrum> {
        pass_through(world, ray, interaction, sampler)
    }

    fn evaluate_volume(
        &self,
        spectrum: Spectrum,
        world: &dyn World,
        ray: &Ray,
        segment: &VolumeSegment,
        sampler: &mut Sampler,
    ) -> Result<Spectrum> {
        self.volume
            .evaluate_volume(spectrum, world, ray, segment, sampler)
    }
}

/// A volume that neither absorbs nor emits. Its surface passes light through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullVolume;

impl Material for NullVolume {
    fn evaluate_surface(
        &self,
        world: &dyn World,
        ray: &Ray,
        interaction: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Result<Spectrum> {
        pass_through(world, ray, interaction, sampler)
    }

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
