use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    float::INV_PI,
    ray::Ray,
    sampler::{Sampler, SamplerI},
    sampling::{cosine_hemisphere_pdf, sample_cosine_hemisphere},
    scene::World,
    spectra::{ConstantSF, SpectralFunction, SpectralFunctionI, Spectrum},
    vecmath::{
        spherical::{abs_cos_theta, cos_theta, same_hemisphere},
        Vector3f,
    },
    Float,
};

use super::bsdf::{ContinuousBsdf, ShadingContext};

/// A perfectly diffuse reflector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lambert {
    pub reflectivity: SpectralFunction,
}

impl Lambert {
    pub fn new(reflectivity: impl Into<SpectralFunction>) -> Lambert {
        Lambert {
            reflectivity: reflectivity.into(),
        }
    }
}

impl Default for Lambert {
    fn default() -> Self {
        Lambert::new(ConstantSF::new(0.5))
    }
}

impl ContinuousBsdf for Lambert {
    fn sample(&self, _s_incoming: &Vector3f, exiting: bool, sampler: &mut Sampler) -> Vector3f {
        let mut w = sample_cosine_hemisphere(sampler.get_2d());
        if exiting {
            w.z = -w.z;
        }
        w
    }

    fn pdf(&self, _s_incoming: &Vector3f, s_outgoing: &Vector3f, exiting: bool) -> Float {
        let cos = if exiting {
            -cos_theta(*s_outgoing)
        } else {
            cos_theta(*s_outgoing)
        };
        if cos > 0.0 {
            cosine_hemisphere_pdf(cos)
        } else {
            0.0
        }
    }

    fn evaluate_shading(
        &self,
        world: &dyn World,
        ray: &Ray,
        s_incoming: &Vector3f,
        s_outgoing: &Vector3f,
        ctx: &ShadingContext,
        sampler: &mut Sampler,
    ) -> Result<Spectrum> {
        if !same_hemisphere(*s_incoming, *s_outgoing) {
            return Ok(ray.new_spectrum());
        }

        let daughter = ray.spawn_daughter(
            ctx.reflection_origin,
            ctx.surface_to_world.apply(s_outgoing),
        );
        let mut spectrum = daughter.trace(world, false, sampler)?;
        let reflectivity =
            self.reflectivity
                .sample(ray.min_wavelength(), ray.max_wavelength(), ray.bins())?;
        spectrum.mul_array(&reflectivity)?;
        spectrum.mul_scalar(abs_cos_theta(*s_outgoing) * INV_PI);
        Ok(spectrum)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use crate::{
        interaction::SurfaceInteraction,
        material::{bsdf::ContinuousBsdf, Material},
        ray::Ray,
        sampler::{IndependentSampler, Sampler},
        scene::{testing::Furnace, BoundingSphere},
        spectra::{InterpolatedSF, SpectralFunction},
        transform::Transform,
        vecmath::{Length, Normal3f, Point3f, Vector3f},
        Float,
    };

    use super::Lambert;

    fn sampler() -> Sampler {
        Sampler::Independent(IndependentSampler::new(17))
    }

    fn floor_hit(exiting: bool) -> SurfaceInteraction {
        SurfaceInteraction {
            hit_point: Point3f::ZERO,
            inside_point: Point3f::new(0.0, 0.0, -1e-3),
            outside_point: Point3f::new(0.0, 0.0, 1e-3),
            normal: Normal3f::new(0.0, 0.0, 1.0),
            exiting,
            world_to_primitive: Transform::IDENTITY,
            primitive_to_world: Transform::IDENTITY,
        }
    }

    fn mean_radiance(
        material: &dyn Material,
        world: &Furnace,
        ray: &Ray,
        interaction: &SurfaceInteraction,
        n: usize,
    ) -> Float {
        let mut sampler = sampler();
        let mut sum = 0.0;
        for _ in 0..n {
            let spectrum = material
                .evaluate_surface(world, ray, interaction, &mut sampler)
                .unwrap();
            sum += spectrum.samples()[0];
        }
        sum / n as Float
    }

    #[test]
    fn samples_follow_the_incident_side() {
        let lambert = Lambert::default();
        let mut sampler = sampler();
        for _ in 0..200 {
            let front = lambert.sample(&Vector3f::Z, false, &mut sampler);
            assert!(front.z >= 0.0);
            assert_approx_eq!(Float, 1.0, front.length(), epsilon = 1e-4);
            let back = lambert.sample(&-Vector3f::Z, true, &mut sampler);
            assert!(back.z <= 0.0);
        }
    }

    #[test]
    fn pdf_is_cosine_on_incident_side_only() {
        let lambert = Lambert::default();
        let up = Vector3f::new(0.0, 0.6, 0.8);
        let down = Vector3f::new(0.0, 0.6, -0.8);
        let expected = 0.8 * crate::float::INV_PI;
        assert_approx_eq!(Float, expected, lambert.pdf(&Vector3f::Z, &up, false));
        assert_eq!(0.0, lambert.pdf(&Vector3f::Z, &down, false));
        assert_approx_eq!(Float, expected, lambert.pdf(&-Vector3f::Z, &down, true));
        assert_eq!(0.0, lambert.pdf(&-Vector3f::Z, &up, true));
    }

    #[test]
    fn white_furnace_without_importance() {
        let world = Furnace::new(2.0);
        let ray = Ray::new(Point3f::new(0.0, 0.0, 1.0), -Vector3f::Z).unwrap();
        let mean = mean_radiance(&Lambert::default(), &world, &ray, &floor_hit(false), 2000);
        assert_approx_eq!(Float, 1.0, mean, epsilon = 1e-3);
    }

    #[test]
    fn white_furnace_with_importance() {
        let world = Furnace::new(2.0)
            .with_important_sphere(BoundingSphere::new(Point3f::new(0.0, 0.0, 10.0), 2.0));
        let mut ray = Ray::new(Point3f::new(0.3, 0.0, 1.0), Vector3f::new(-0.3, 0.0, -1.0)).unwrap();
        ray.set_important_path_weight(0.5).unwrap();
        let mean = mean_radiance(&Lambert::default(), &world, &ray, &floor_hit(false), 20000);
        assert_approx_eq!(Float, 1.0, mean, epsilon = 0.03);
    }

    #[test]
    fn white_furnace_from_behind() {
        let world = Furnace::new(1.0);
        let ray = Ray::new(Point3f::new(0.0, 0.0, -1.0), Vector3f::Z).unwrap();
        let lambert = Lambert::new(crate::spectra::ConstantSF::new(0.8));
        let mean = mean_radiance(&lambert, &world, &ray, &floor_hit(true), 2000);
        assert_approx_eq!(Float, 0.8, mean, epsilon = 1e-3);
    }

    #[test]
    fn reflectivity_is_applied_per_bin() {
        let world = Furnace::new(1.0);
        let mut ray = Ray::new(Point3f::new(0.0, 0.0, 1.0), -Vector3f::Z).unwrap();
        ray.set_spectral_range(400.0, 600.0, 2).unwrap();
        let reflectivity = InterpolatedSF::new(&[400.0, 600.0], &[0.2, 0.6], false).unwrap();
        let lambert = Lambert::new(reflectivity);

        let spectrum = lambert
            .evaluate_surface(&world, &ray, &floor_hit(false), &mut sampler())
            .unwrap();
        assert_approx_eq!(Float, 0.3, spectrum.samples()[0], epsilon = 1e-4);
        assert_approx_eq!(Float, 0.5, spectrum.samples()[1], epsilon = 1e-4);
    }

    #[test]
    fn volume_is_transparent() {
        let world = Furnace::new(0.0);
        let ray = Ray::new(Point3f::ZERO, Vector3f::Z).unwrap();
        let mut spectrum = ray.new_spectrum();
        spectrum.samples_mut()[3] = 7.0;
        let segment = crate::interaction::VolumeSegment {
            start_point: Point3f::ZERO,
            end_point: Point3f::new(0.0, 0.0, 1.0),
            world_to_primitive: Transform::IDENTITY,
            primitive_to_world: Transform::IDENTITY,
        };
        let output = Material::evaluate_volume(
            &Lambert::default(),
            spectrum.clone(),
            &world,
            &ray,
            &segment,
            &mut sampler(),
        )
        .unwrap();
        assert_eq!(spectrum.samples(), output.samples());
    }

    #[test]
    fn lambert_from_json() {
        let lambert: Lambert =
            serde_json::from_str(r#"{"reflectivity": {"type": "constant", "value": 0.3}}"#)
                .unwrap();
        match lambert.reflectivity {
            SpectralFunction::Constant(c) => assert_eq!(0.3, c.value()),
            other => panic!("unexpected reflectivity {:?}", other),
        }
    }
}
