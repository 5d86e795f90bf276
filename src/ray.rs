use log::trace;

use crate::{
    error::{Error, Result},
    options::Options,
    sampler::{Sampler, SamplerI},
    scene::World,
    spectra::{check_band, check_bins, Spectrum},
    vecmath::{Normalize, Point3f, Vector3f},
    Float,
};

/// A spectral ray. Carries the wavelength grid its radiance is sampled on,
/// its recursion depth, and the path-termination and importance sampling
/// settings that daughter rays inherit.
#[derive(Debug, Clone)]
pub struct Ray {
    /// Origin of the ray
    pub origin: Point3f,
    /// Direction of the ray; unit length.
    pub direction: Vector3f,
    /// Number of scattering events between the ray and the observer.
    pub depth: u32,
    min_wavelength: Float,
    max_wavelength: Float,
    bins: usize,
    max_depth: u32,
    extinction_prob: Float,
    extinction_min_depth: u32,
    importance_sampling: bool,
    important_path_weight: Float,
}

impl Ray {
    pub fn from_options(origin: Point3f, direction: Vector3f, options: &Options) -> Result<Ray> {
        options.validate()?;
        Ok(Ray {
            origin,
            direction: direction.normalize(),
            depth: 0,
            min_wavelength: options.min_wavelength,
            max_wavelength: options.max_wavelength,
            bins: options.bins,
            max_depth: options.max_depth,
            extinction_prob: options.extinction_prob,
            extinction_min_depth: options.extinction_min_depth,
            importance_sampling: options.importance_sampling,
            important_path_weight: options.important_path_weight,
        })
    }

    pub fn new(origin: Point3f, direction: Vector3f) -> Result<Ray> {
        Ray::from_options(origin, direction, &Options::default())
    }

    /// Point along the ray at parametric distance t.
    pub fn at(&self, t: Float) -> Point3f {
        self.origin + self.direction * t
    }

    pub fn min_wavelength(&self) -> Float {
        self.min_wavelength
    }

    pub fn max_wavelength(&self) -> Float {
        self.max_wavelength
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn set_spectral_range(
        &mut self,
        min_wavelength: Float,
        max_wavelength: Float,
        bins: usize,
    ) -> Result<()> {
        check_band(min_wavelength, max_wavelength)?;
        check_bins(bins)?;
        self.min_wavelength = min_wavelength;
        self.max_wavelength = max_wavelength;
        self.bins = bins;
        Ok(())
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    pub fn importance_sampling(&self) -> bool {
        self.importance_sampling
    }

    pub fn set_importance_sampling(&mut self, enabled: bool) {
        self.importance_sampling = enabled;
    }

    /// Probability of following an important direction when the scene has one.
    pub fn important_path_weight(&self) -> Float {
        self.important_path_weight
    }

    pub fn set_important_path_weight(&mut self, weight: Float) -> Result<()> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(Error::InvalidProbability {
                name: "important_path_weight",
                value: weight,
            });
        }
        self.important_path_weight = weight;
        Ok(())
    }

    pub fn extinction_prob(&self) -> Float {
        self.extinction_prob
    }

    pub fn set_extinction_prob(&mut self, probability: Float) -> Result<()> {
        if !(0.0..1.0).contains(&probability) {
            return Err(Error::InvalidProbability {
                name: "extinction_prob",
                value: probability,
            });
        }
        self.extinction_prob = probability;
        Ok(())
    }

    pub fn extinction_min_depth(&self) -> u32 {
        self.extinction_min_depth
    }

    pub fn set_extinction_min_depth(&mut self, depth: u32) {
        self.extinction_min_depth = depth;
    }

    /// A zero spectrum on this ray's wavelength grid.
    pub fn new_spectrum(&self) -> Spectrum {
        Spectrum::new_unchecked(self.min_wavelength, self.max_wavelength, self.bins)
    }

    /// A ray one scattering event further from the observer, with the same
    /// spectral and sampling configuration.
    pub fn spawn_daughter(&self, origin: Point3f, direction: Vector3f) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Radiance arriving at the ray origin from along the ray.
    ///
    /// Rays at the maximum depth return zero. Unless `keep_alive` is set, rays
    /// at or beyond the extinction depth are terminated with probability
    /// `extinction_prob` and survivors are reweighted to stay unbiased.
    pub fn trace(&self, world: &dyn World, keep_alive: bool, sampler: &mut Sampler) -> Result<Spectrum> {
        if self.depth >= self.max_depth {
            return Ok(self.new_spectrum());
        }

        if !keep_alive && self.depth >= self.extinction_min_depth && self.extinction_prob > 0.0 {
            if sampler.get_1d() < self.extinction_prob {
                trace!("Path extinguished at depth {}", self.depth);
                return Ok(self.new_spectrum());
            }
            let mut spectrum = world.evaluate_ray(self, sampler)?;
            spectrum.div_scalar(1.0 - self.extinction_prob);
            return Ok(spectrum);
        }

        world.evaluate_ray(self, sampler)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use crate::{
        error::Error,
        options::Options,
        sampler::{IndependentSampler, Sampler},
        scene::testing::Furnace,
        vecmath::{Point3f, Vector3f},
        Float,
    };

    use super::Ray;

    fn sampler() -> Sampler {
        Sampler::Independent(IndependentSampler::new(42))
    }

    #[test]
    fn daughter_inherits_configuration() {
        let mut ray = Ray::new(Point3f::ZERO, Vector3f::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(Vector3f::Z, ray.direction);
        ray.set_important_path_weight(0.8).unwrap();
        ray.set_spectral_range(400.0, 700.0, 12).unwrap();
        let daughter = ray.spawn_daughter(Point3f::new(1.0, 0.0, 0.0), Vector3f::X);
        assert_eq!(1, daughter.depth);
        assert_eq!(Point3f::new(1.0, 0.0, 0.0), daughter.origin);
        assert_eq!(0.8, daughter.important_path_weight());
        assert_eq!(12, daughter.new_spectrum().bins());
        assert_eq!(2, daughter.spawn_daughter(Point3f::ZERO, Vector3f::Y).depth);
    }

    #[test]
    fn invalid_settings_rejected() {
        let mut ray = Ray::new(Point3f::ZERO, Vector3f::Z).unwrap();
        assert!(matches!(
            ray.set_important_path_weight(-0.1),
            Err(Error::InvalidProbability { .. })
        ));
        assert!(matches!(
            ray.set_extinction_prob(1.0),
            Err(Error::InvalidProbability { .. })
        ));
        assert!(matches!(
            ray.set_spectral_range(400.0, 400.0, 3),
            Err(Error::InvalidWavelengthRange { .. })
        ));
        let options = Options {
            bins: 0,
            ..Default::default()
        };
        assert!(Ray::from_options(Point3f::ZERO, Vector3f::Z, &options).is_err());
    }

    #[test]
    fn max_depth_returns_zero() {
        let world = Furnace::new(1.0);
        let mut ray = Ray::new(Point3f::ZERO, Vector3f::Z).unwrap();
        ray.set_max_depth(2);
        ray.depth = 2;
        assert!(ray.trace(&world, true, &mut sampler()).unwrap().is_zero());
        assert_eq!(0, world.calls.get());
    }

    #[test]
    fn shallow_rays_are_never_extinguished() {
        let world = Furnace::new(1.0);
        let ray = Ray::new(Point3f::ZERO, Vector3f::Z).unwrap();
        let mut sampler = sampler();
        for _ in 0..100 {
            let spectrum = ray.trace(&world, false, &mut sampler).unwrap();
            assert_eq!(1.0, spectrum.samples()[0]);
        }
        assert_eq!(100, world.calls.get());
    }

    #[test]
    fn russian_roulette_is_unbiased() {
        let world = Furnace::new(1.0);
        let mut ray = Ray::new(Point3f::ZERO, Vector3f::Z).unwrap();
        ray.set_extinction_prob(0.5).unwrap();
        ray.set_extinction_min_depth(0);

        let mut sampler = sampler();
        let n = 20000;
        let mut sum = 0.0;
        for _ in 0..n {
            let spectrum = ray.trace(&world, false, &mut sampler).unwrap();
            let value = spectrum.samples()[0];
            assert!(value == 0.0 || value == 2.0);
            sum += value;
        }
        assert_approx_eq!(Float, 1.0, sum / n as Float, epsilon = 0.05);

        // keep_alive bypasses extinction entirely.
        let spectrum = ray.trace(&world, true, &mut sampler).unwrap();
        assert_eq!(1.0, spectrum.samples()[0]);
    }
}
