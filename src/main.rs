use std::{fs, path::PathBuf};

use clap::Parser;
use log::info;
use radiant::{
    error::Result,
    interaction::{SurfaceInteraction, VolumeSegment},
    material::{Lambert, Material},
    options::Options,
    ray::Ray,
    sampler::{Sampler, SamplerI},
    scene::{BoundingSphere, ImportanceManager, Primitive, World},
    spectra::{
        Blackbody, ConstantSF, NumericallyIntegratedSF, SpectralFunction, SpectralFunctionI,
        Spectrum,
    },
    transform::Transform,
    vecmath::{Length, Normal3f, Normalize, Point3f, Vector3f},
    Float,
};

/// Offset used to launch rays off a surface without re-hitting it.
const SURFACE_EPSILON: Float = 1e-4;

/// Estimates the spectral radiance seen by one camera ray looking at a
/// diffuse plane lit by a blackbody sphere.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// JSON file of render options; missing fields take their defaults
    #[clap(short, long, value_parser)]
    options: Option<PathBuf>,

    /// Number of samples to average
    #[clap(short, long, value_parser, default_value_t = 4096)]
    samples: u64,

    /// Light temperature in kelvin
    #[clap(short, long, value_parser, default_value_t = 5500.0)]
    temperature: Float,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = match &args.options {
        Some(path) => Options::from_json(&fs::read_to_string(path)?)?,
        None => Options::default(),
    };
    let samples = args.samples.max(1);

    let world = DemoWorld::new(Blackbody::new(args.temperature)?)?;
    let mut sampler = Sampler::from_options(&options);
    let camera_ray = Ray::from_options(
        Point3f::new(-2.0, 0.0, 2.0),
        Vector3f::new(1.0, 0.0, -1.0),
        &options,
    )?;

    let mut radiance = camera_ray.new_spectrum();
    for i in 0..samples {
        sampler.start_sample(i);
        let sample = camera_ray.trace(&world, true, &mut sampler)?;
        radiance.add_spectrum(&sample)?;
    }
    radiance.div_scalar(samples as Float);

    info!(
        "Mean radiance over {} samples: total {}, peak bin {:?}",
        samples,
        radiance.total(),
        radiance
            .samples()
            .iter()
            .copied()
            .fold(Float::NEG_INFINITY, Float::max)
    );
    for (wavelength, value) in radiance.wavelengths().iter().zip(radiance.samples()) {
        info!("{:>7.1} nm  {:.5}", wavelength, value);
    }
    Ok(())
}

/// Emits the same spectral radiance in every direction and neither absorbs
/// nor scatters.
struct UniformEmitter {
    radiance: SpectralFunction,
}

impl Material for UniformEmitter {
    fn evaluate_surface(
        &self,
        _world: &dyn World,
        ray: &Ray,
        _interaction: &SurfaceInteraction,
        _sampler: &mut Sampler,
    ) -> Result<Spectrum> {
        let mut spectrum = ray.new_spectrum();
        let samples =
            self.radiance
                .sample(ray.min_wavelength(), ray.max_wavelength(), ray.bins())?;
        spectrum.add_array(&samples)?;
        Ok(spectrum)
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

/// A unit sphere placed in the world by `primitive_to_world`.
struct SphereLight {
    sphere: BoundingSphere,
    primitive_to_world: Transform,
    material: UniformEmitter,
}

impl SphereLight {
    fn new(centre: Point3f, radius: Float, material: UniformEmitter) -> SphereLight {
        SphereLight {
            sphere: BoundingSphere::new(centre, radius),
            primitive_to_world: Transform::translate(centre - Point3f::ZERO)
                * Transform::scale(radius, radius, radius),
            material,
        }
    }

    /// Nearest hit distance beyond the surface epsilon.
    fn intersect(&self, ray: &Ray) -> Option<Float> {
        let oc = ray.origin - self.sphere.centre;
        let b = oc.dot(&ray.direction);
        let c = oc.length_squared() - self.sphere.radius * self.sphere.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        [-b - root, -b + root]
            .into_iter()
            .find(|t| *t > SURFACE_EPSILON)
    }
}

impl Primitive for SphereLight {
    fn material(&self) -> &dyn Material {
        &self.material
    }

    fn bounding_sphere(&self) -> BoundingSphere {
        self.sphere
    }

    fn importance(&self) -> Float {
        1.0
    }
}

/// A diffuse ground plane at z = 0 lit by a single spherical light.
struct DemoWorld {
    ground: Lambert,
    light: SphereLight,
    importance: ImportanceManager,
}

impl DemoWorld {
    fn new(emission: Blackbody) -> Result<DemoWorld> {
        let light = SphereLight::new(
            Point3f::new(3.0, 0.0, 3.0),
            1.0,
            UniformEmitter {
                radiance: SpectralFunction::Blackbody(NumericallyIntegratedSF::new(emission, 1.0)?),
            },
        );
        let importance = ImportanceManager::new(&[&light]);
        Ok(DemoWorld {
            ground: Lambert::new(ConstantSF::new(0.8)),
            light,
            importance,
        })
    }
}

/// Builds a hit from a world-space point and direction, with the geometry
/// expressed in the primitive's local space.
fn interaction(
    world_hit: Point3f,
    direction: &Vector3f,
    primitive_to_world: Transform,
    local_normal: impl Fn(&Point3f) -> Vector3f,
) -> SurfaceInteraction {
    let world_to_primitive = primitive_to_world.inverse();
    let hit_point = world_to_primitive.apply(&world_hit);
    let normal = local_normal(&hit_point);
    let offset = normal * SURFACE_EPSILON;
    SurfaceInteraction {
        hit_point,
        inside_point: hit_point - offset,
        outside_point: hit_point + offset,
        normal: Normal3f::from(normal),
        exiting: world_to_primitive.apply(direction).dot(&normal) > 0.0,
        world_to_primitive,
        primitive_to_world,
    }
}

impl World for DemoWorld {
    fn has_important_primitives(&self) -> bool {
        self.importance.has_primitives()
    }

    fn important_direction_sample(&self, point: &Point3f, sampler: &mut Sampler) -> Vector3f {
        self.importance.sample(point, sampler)
    }

    fn important_direction_pdf(&self, point: &Point3f, direction: &Vector3f) -> Float {
        self.importance.pdf(point, direction)
    }

    fn evaluate_ray(&self, ray: &Ray, sampler: &mut Sampler) -> Result<Spectrum> {
        let t_light = self.light.intersect(ray);
        let t_ground = if ray.direction.z != 0.0 {
            Some(-ray.origin.z / ray.direction.z).filter(|t| *t > SURFACE_EPSILON)
        } else {
            None
        };

        match (t_light, t_ground) {
            (Some(t), ground) if ground.map_or(true, |g| t < g) => {
                let hit = interaction(
                    ray.at(t),
                    &ray.direction,
                    self.light.primitive_to_world,
                    |p| (p - Point3f::ZERO).normalize(),
                );
                self.light
                    .material()
                    .evaluate_surface(self, ray, &hit, sampler)
            }
            (_, Some(t)) => {
                let hit = interaction(ray.at(t), &ray.direction, Transform::IDENTITY, |_| {
                    Vector3f::Z
                });
                self.ground.evaluate_surface(self, ray, &hit, sampler)
            }
            _ => Ok(ray.new_spectrum()),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use float_cmp::assert_approx_eq;
    use radiant::{
        ray::Ray,
        spectra::Blackbody,
        vecmath::{Length, Point3f, Vector3f},
        Float,
    };

    use super::{interaction, Args, DemoWorld};

    #[test]
    fn light_hits_are_local_to_unit_sphere() {
        let world = DemoWorld::new(Blackbody::new(5500.0).unwrap()).unwrap();
        let ray = Ray::new(Point3f::new(0.0, 0.0, 3.0), Vector3f::X).unwrap();
        let t = world.light.intersect(&ray).unwrap();
        assert_approx_eq!(Float, 2.0, t, epsilon = 1e-5);

        let hit = interaction(
            ray.at(t),
            &ray.direction,
            world.light.primitive_to_world,
            |p| *p - Point3f::ZERO,
        );
        assert_approx_eq!(Float, 1.0, (hit.hit_point - Point3f::ZERO).length(), epsilon = 1e-5);
        assert_approx_eq!(Float, -1.0, hit.hit_point.x, epsilon = 1e-5);
        assert!(!hit.exiting);
        let back = hit.primitive_to_world.apply(&hit.hit_point);
        assert_approx_eq!(Float, 2.0, back.x, epsilon = 1e-5);
    }

    #[test]
    fn arguments_default_and_override() {
        let args = Args::parse_from(["radiant"]);
        assert!(args.options.is_none());
        assert_eq!(4096, args.samples);
        assert_eq!(5500.0, args.temperature);

        let args = Args::parse_from(["radiant", "-s", "8", "--options", "render.json"]);
        assert_eq!(8, args.samples);
        assert_eq!(Some("render.json"), args.options.as_deref().and_then(|p| p.to_str()));
    }
}
