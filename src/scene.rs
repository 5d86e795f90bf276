//! What the shading engine needs from the scene, and importance sampling of
//! directions toward important primitives.

use log::{debug, warn};

use crate::{
    error::Result,
    frame::Frame,
    material::Material,
    ray::Ray,
    sampler::{Sampler, SamplerI},
    sampling::{
        sample_discrete, sample_uniform_cone, sample_uniform_sphere, uniform_cone_pdf,
        uniform_sphere_pdf,
    },
    spectra::Spectrum,
    vecmath::{Length, Normalize, Point3f, Vector3f},
    Float,
};

/// The scene as seen from a shading evaluation.
pub trait World {
    /// True if any primitive asked to be preferentially sampled.
    fn has_important_primitives(&self) -> bool;

    /// Draws a world-space unit direction from `point` toward the important
    /// primitives.
    fn important_direction_sample(&self, point: &Point3f, sampler: &mut Sampler) -> Vector3f;

    /// Solid-angle density of `important_direction_sample` for `direction`.
    fn important_direction_pdf(&self, point: &Point3f, direction: &Vector3f) -> Float;

    /// Finds the nearest intersection along the ray and returns the radiance
    /// arriving at its origin.
    fn evaluate_ray(&self, ray: &Ray, sampler: &mut Sampler) -> Result<Spectrum>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub centre: Point3f,
    pub radius: Float,
}

impl BoundingSphere {
    pub fn new(centre: Point3f, radius: Float) -> BoundingSphere {
        BoundingSphere { centre, radius }
    }

    pub fn contains(&self, point: &Point3f) -> bool {
        self.centre.distance_squared(point) <= self.radius * self.radius
    }
}

pub trait Primitive {
    fn material(&self) -> &dyn Material;

    /// World-space sphere enclosing the primitive.
    fn bounding_sphere(&self) -> BoundingSphere;

    /// Relative weight when sampling important directions; zero if the
    /// primitive is not important.
    fn importance(&self) -> Float {
        0.0
    }
}

/// Samples directions toward the bounding spheres of important primitives.
///
/// A sphere is chosen with probability proportional to its importance, then a
/// direction is drawn uniformly inside the cone it subtends. From a point
/// inside a sphere the whole sphere of directions is used instead.
#[derive(Debug, Clone, Default)]
pub struct ImportanceManager {
    spheres: Vec<BoundingSphere>,
    weights: Vec<Float>,
    probabilities: Vec<Float>,
}

impl ImportanceManager {
    pub fn new(primitives: &[&dyn Primitive]) -> ImportanceManager {
        let spheres: Vec<(BoundingSphere, Float)> = primitives
            .iter()
            .map(|p| (p.bounding_sphere(), p.importance()))
            .collect();
        ImportanceManager::from_spheres(&spheres)
    }

    /// Builds from (sphere, importance) pairs; non-positive importances are dropped.
    pub fn from_spheres(spheres: &[(BoundingSphere, Float)]) -> ImportanceManager {
        let (spheres, weights): (Vec<BoundingSphere>, Vec<Float>) = spheres
            .iter()
            .filter(|(_, importance)| *importance > 0.0)
            .copied()
            .unzip();
        let total: Float = weights.iter().sum();
        let probabilities = weights.iter().map(|w| w / total).collect();
        debug!("Importance sampling {} primitives", spheres.len());
        ImportanceManager {
            spheres,
            weights,
            probabilities,
        }
    }

    pub fn has_primitives(&self) -> bool {
        !self.spheres.is_empty()
    }

    pub fn sample(&self, point: &Point3f, sampler: &mut Sampler) -> Vector3f {
        let u = sampler.get_1d();
        let Some(index) = sample_discrete(&self.weights, u, None, None) else {
            warn!("Important direction requested with no important primitives");
            return sample_uniform_sphere(sampler.get_2d());
        };

        let sphere = &self.spheres[index];
        if sphere.contains(point) {
            return sample_uniform_sphere(sampler.get_2d());
        }
        let to_centre = sphere.centre - point;
        let distance = to_centre.length();
        let cos_theta_max = cone_cos_theta_max(sphere.radius, distance);
        let frame = Frame::from_z(to_centre / distance);
        frame
            .from_local(&sample_uniform_cone(sampler.get_2d(), cos_theta_max))
            .normalize()
    }

    pub fn pdf(&self, point: &Point3f, direction: &Vector3f) -> Float {
        if !self.has_primitives() {
            return uniform_sphere_pdf();
        }
        let direction = direction.normalize();
        self.spheres
            .iter()
            .zip(&self.probabilities)
            .map(|(sphere, probability)| {
                if sphere.contains(point) {
                    return probability * uniform_sphere_pdf();
                }
                let to_centre = sphere.centre - point;
                let distance = to_centre.length();
                let cos_theta_max = cone_cos_theta_max(sphere.radius, distance);
                let cos_theta = direction.dot(&(to_centre / distance));
                if cos_theta >= cos_theta_max - rim_tolerance(cos_theta_max) {
                    probability * uniform_cone_pdf(cos_theta_max)
                } else {
                    0.0
                }
            })
            .sum()
    }
}

/// Cosine of the half-angle of the cone subtended by a sphere.
fn cone_cos_theta_max(radius: Float, distance: Float) -> Float {
    let sin_theta_max = radius / distance;
    Float::sqrt(Float::max(0.0, 1.0 - sin_theta_max * sin_theta_max))
}

/// Directions drawn on the rim of a cone can round to just outside it once
/// rotated and normalised; they still count as inside.
fn rim_tolerance(cos_theta_max: Float) -> Float {
    Float::max(1e-4 * (1.0 - cos_theta_max), 8.0 * Float::EPSILON)
}


#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use crate::{
        material::{Material, NullVolume},
        sampler::{IndependentSampler, Sampler},
        sampling::{uniform_cone_pdf, uniform_sphere_pdf},
        vecmath::{Point3f, Vector3f},
        Float,
    };

    use super::{BoundingSphere, ImportanceManager, Primitive};

    struct Ball {
        sphere: BoundingSphere,
        importance: Float,
        material: NullVolume,
    }

    impl Primitive for Ball {
        fn material(&self) -> &dyn Material {
            &self.material
        }

        fn bounding_sphere(&self) -> BoundingSphere {
            self.sphere
        }

        fn importance(&self) -> Float {
            self.importance
        }
    }

    fn ball(x: Float, radius: Float, importance: Float) -> Ball {
        Ball {
            sphere: BoundingSphere::new(Point3f::new(x, 0.0, 0.0), radius),
            importance,
            material: NullVolume,
        }
    }

    #[test]
    fn unimportant_primitives_are_ignored() {
        let a = ball(5.0, 1.0, 0.0);
        let manager = ImportanceManager::new(&[&a]);
        assert!(!manager.has_primitives());
        assert_eq!(
            uniform_sphere_pdf(),
            manager.pdf(&Point3f::ZERO, &Vector3f::X)
        );
    }

    #[test]
    fn samples_fall_inside_cone() {
        let a = ball(10.0, 1.0, 1.0);
        let manager = ImportanceManager::new(&[&a]);
        let mut sampler = Sampler::Independent(IndependentSampler::new(5));
        let cos_theta_max = Float::sqrt(1.0 - 0.01);
        for _ in 0..500 {
            let w = manager.sample(&Point3f::ZERO, &mut sampler);
            assert!(w.x >= cos_theta_max - 1e-4);
            // Clear of the cone's rim, the density is the cone density.
            if w.x > cos_theta_max + 1e-4 {
                assert_approx_eq!(
                    Float,
                    uniform_cone_pdf(cos_theta_max),
                    manager.pdf(&Point3f::ZERO, &w),
                    epsilon = 1.0
                );
            }
        }
        assert_eq!(0.0, manager.pdf(&Point3f::ZERO, &-Vector3f::X));
    }

    #[test]
    fn sampled_directions_have_positive_density() {
        let near = Ball {
            sphere: BoundingSphere::new(Point3f::new(10.0, 3.0, 0.0), 1.0),
            importance: 1.0,
            material: NullVolume,
        };
        let far = Ball {
            sphere: BoundingSphere::new(Point3f::new(-2.0, 40.0, 7.0), 0.5),
            importance: 2.0,
            material: NullVolume,
        };
        let manager = ImportanceManager::new(&[&near, &far]);
        let mut sampler = Sampler::Independent(IndependentSampler::new(11));
        let origin = Point3f::new(0.3, -0.2, 0.1);
        for _ in 0..100_000 {
            let w = manager.sample(&origin, &mut sampler);
            assert!(manager.pdf(&origin, &w) > 0.0, "zero density for {:?}", w);
        }
    }

    #[test]
    fn pdf_mixes_by_importance() {
        let a = ball(10.0, 1.0, 3.0);
        let b = ball(-10.0, 1.0, 1.0);
        let manager = ImportanceManager::new(&[&a, &b]);
        let cone = uniform_cone_pdf(Float::sqrt(1.0 - 0.01));
        assert_approx_eq!(
            Float,
            0.75 * cone,
            manager.pdf(&Point3f::ZERO, &Vector3f::X),
            epsilon = 1e-2
        );
        assert_approx_eq!(
            Float,
            0.25 * cone,
            manager.pdf(&Point3f::ZERO, &-Vector3f::X),
            epsilon = 1e-2
        );
    }

    #[test]
    fn inside_sphere_uses_full_sphere() {
        let a = ball(0.0, 2.0, 1.0);
        let manager = ImportanceManager::new(&[&a]);
        assert_approx_eq!(
            Float,
            uniform_sphere_pdf(),
            manager.pdf(&Point3f::new(0.5, 0.0, 0.0), &Vector3f::Y)
        );
    }
}
