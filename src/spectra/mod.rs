//! Wavelength-dependent functions.
//!
//! Every spectral function supplies a point `evaluate` and a definite
//! `integrate`; `average` and `sample` are derived from `integrate` and
//! memoised in a single-slot [`SpectralCache`]. Wavelengths are in nanometers.

mod blackbody;
mod cache;
mod constant;
mod interpolated;
mod named;
mod numerical;
mod spectrum;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    Float,
};

pub use blackbody::{Blackbody, Sellmeier};
pub use cache::SpectralCache;
pub use constant::ConstantSF;
pub use interpolated::InterpolatedSF;
pub use named::NamedSpectrum;
pub use numerical::{ContinuousFunction, NumericallyIntegratedSF};
pub use spectrum::Spectrum;

pub trait SpectralFunctionI {
    /// The value at a single wavelength.
    fn evaluate(&self, wavelength: Float) -> Float;

    /// Definite integral over [min_wavelength, max_wavelength]. Swapping the
    /// bounds negates the result.
    fn integrate(&self, min_wavelength: Float, max_wavelength: Float) -> Float;

    fn cache(&self) -> &SpectralCache;

    /// Mean value over the band. Cached on the exact bounds.
    fn average(&self, min_wavelength: Float, max_wavelength: Float) -> Result<Float> {
        check_band(min_wavelength, max_wavelength)?;
        Ok(self.cache().average(min_wavelength, max_wavelength, || {
            self.integrate(min_wavelength, max_wavelength) / (max_wavelength - min_wavelength)
        }))
    }

    /// Resamples onto `bins` equal-width bins spanning the band; each entry is
    /// the average over its bin. Cached on the exact bounds and bin count, and
    /// repeated requests share one array.
    fn sample(
        &self,
        min_wavelength: Float,
        max_wavelength: Float,
        bins: usize,
    ) -> Result<Arc<[Float]>> {
        check_band(min_wavelength, max_wavelength)?;
        check_bins(bins)?;
        Ok(self.cache().sample(min_wavelength, max_wavelength, bins, || {
            bin_averages(self, min_wavelength, max_wavelength, bins)
        }))
    }
}

/// A band is valid when both bounds are finite and max > min.
pub(crate) fn check_band(min_wavelength: Float, max_wavelength: Float) -> Result<()> {
    if min_wavelength.is_finite() && max_wavelength.is_finite() && max_wavelength > min_wavelength
    {
        Ok(())
    } else {
        Err(Error::InvalidWavelengthRange {
            min: min_wavelength,
            max: max_wavelength,
        })
    }
}

pub(crate) fn check_bins(bins: usize) -> Result<()> {
    if bins == 0 {
        Err(Error::InvalidBinCount)
    } else {
        Ok(())
    }
}

/// Lower and upper bound of bin `i`.
pub(crate) fn bin_bounds(
    min_wavelength: Float,
    max_wavelength: Float,
    bins: usize,
    i: usize,
) -> (Float, Float) {
    let delta = (max_wavelength - min_wavelength) / bins as Float;
    (
        min_wavelength + i as Float * delta,
        min_wavelength + (i + 1) as Float * delta,
    )
}

fn bin_averages<S: SpectralFunctionI + ?Sized>(
    function: &S,
    min_wavelength: Float,
    max_wavelength: Float,
    bins: usize,
) -> Vec<Float> {
    let delta = (max_wavelength - min_wavelength) / bins as Float;
    (0..bins)
        .map(|i| {
            let (lower, upper) = bin_bounds(min_wavelength, max_wavelength, bins, i);
            function.integrate(lower, upper) / delta
        })
        .collect()
}

/// The spectral function variants that can be stored in materials and saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpectralFunction {
    Constant(ConstantSF),
    Interpolated(InterpolatedSF),
    Blackbody(NumericallyIntegratedSF<Blackbody>),
    Sellmeier(NumericallyIntegratedSF<Sellmeier>),
    Sampled(Spectrum),
}

impl SpectralFunctionI for SpectralFunction {
    fn evaluate(&self, wavelength: Float) -> Float {
        match self {
            SpectralFunction::Constant(f) => f.evaluate(wavelength),
            SpectralFunction::Interpolated(f) => f.evaluate(wavelength),
            SpectralFunction::Blackbody(f) => f.evaluate(wavelength),
            SpectralFunction::Sellmeier(f) => f.evaluate(wavelength),
            SpectralFunction::Sampled(f) => f.evaluate(wavelength),
        }
    }

    fn integrate(&self, min_wavelength: Float, max_wavelength: Float) -> Float {
        match self {
            SpectralFunction::Constant(f) => f.integrate(min_wavelength, max_wavelength),
            SpectralFunction::Interpolated(f) => f.integrate(min_wavelength, max_wavelength),
            SpectralFunction::Blackbody(f) => f.integrate(min_wavelength, max_wavelength),
            SpectralFunction::Sellmeier(f) => f.integrate(min_wavelength, max_wavelength),
            SpectralFunction::Sampled(f) => f.integrate(min_wavelength, max_wavelength),
        }
    }

    fn cache(&self) -> &SpectralCache {
        match self {
            SpectralFunction::Constant(f) => f.cache(),
            SpectralFunction::Interpolated(f) => f.cache(),
            SpectralFunction::Blackbody(f) => f.cache(),
            SpectralFunction::Sellmeier(f) => f.cache(),
            SpectralFunction::Sampled(f) => f.cache(),
        }
    }

    // Forwarded so that closed-form overrides are kept.
    fn average(&self, min_wavelength: Float, max_wavelength: Float) -> Result<Float> {
        match self {
            SpectralFunction::Constant(f) => f.average(min_wavelength, max_wavelength),
            SpectralFunction::Interpolated(f) => f.average(min_wavelength, max_wavelength),
            SpectralFunction::Blackbody(f) => f.average(min_wavelength, max_wavelength),
            SpectralFunction::Sellmeier(f) => f.average(min_wavelength, max_wavelength),
            SpectralFunction::Sampled(f) => f.average(min_wavelength, max_wavelength),
        }
    }

    fn sample(
        &self,
        min_wavelength: Float,
        max_wavelength: Float,
        bins: usize,
    ) -> Result<Arc<[Float]>> {
        match self {
            SpectralFunction::Constant(f) => f.sample(min_wavelength, max_wavelength, bins),
            SpectralFunction::Interpolated(f) => f.sample(min_wavelength, max_wavelength, bins),
            SpectralFunction::Blackbody(f) => f.sample(min_wavelength, max_wavelength, bins),
            SpectralFunction::Sellmeier(f) => f.sample(min_wavelength, max_wavelength, bins),
            SpectralFunction::Sampled(f) => f.sample(min_wavelength, max_wavelength, bins),
        }
    }
}

impl From<ConstantSF> for SpectralFunction {
    fn from(f: ConstantSF) -> Self {
        SpectralFunction::Constant(f)
    }
}

impl From<InterpolatedSF> for SpectralFunction {
    fn from(f: InterpolatedSF) -> Self {
        SpectralFunction::Interpolated(f)
    }
}

impl From<Spectrum> for SpectralFunction {
    fn from(f: Spectrum) -> Self {
        SpectralFunction::Sampled(f)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use float_cmp::assert_approx_eq;

    use crate::{error::Error, Float};

    use super::{
        bin_bounds, Blackbody, ConstantSF, InterpolatedSF, NumericallyIntegratedSF,
        SpectralFunction, SpectralFunctionI,
    };

    fn functions() -> Vec<SpectralFunction> {
        vec![
            ConstantSF::new(0.7).into(),
            InterpolatedSF::new(&[400.0, 500.0, 650.0], &[0.1, 0.9, 0.3], false)
                .unwrap()
                .into(),
            SpectralFunction::Blackbody(
                NumericallyIntegratedSF::new(Blackbody::new(5000.0).unwrap(), 1.0).unwrap(),
            ),
        ]
    }

    #[test]
    fn average_is_integral_over_width() {
        for f in functions() {
            for (a, b) in [(380.0, 720.0), (450.0, 451.0), (300.0, 800.0)] {
                let expected = f.integrate(a, b) / (b - a);
                assert_approx_eq!(Float, expected, f.average(a, b).unwrap(), ulps = 4);
            }
        }
    }

    #[test]
    fn sample_is_per_bin_average() {
        for f in functions() {
            let (a, b, n) = (390.0, 710.0, 8);
            let samples = f.sample(a, b, n).unwrap();
            assert_eq!(n, samples.len());
            let width = (b - a) / n as Float;
            for (i, s) in samples.iter().enumerate() {
                let (lower, upper) = bin_bounds(a, b, n, i);
                assert_approx_eq!(Float, f.integrate(lower, upper) / width, *s, ulps = 4);
            }
        }
    }

    #[test]
    fn repeated_requests_hit_cache() {
        for f in functions() {
            let first = f.sample(400.0, 700.0, 5).unwrap();
            let second = f.sample(400.0, 700.0, 5).unwrap();
            assert!(Arc::ptr_eq(&first, &second));
            let other = f.sample(400.0, 700.0, 6).unwrap();
            assert!(!Arc::ptr_eq(&first, &other));
            assert_eq!(6, other.len());

            let avg = f.average(400.0, 700.0).unwrap();
            assert_eq!(avg.to_bits(), f.average(400.0, 700.0).unwrap().to_bits());
        }
    }

    #[test]
    fn degenerate_requests_rejected() {
        for f in functions() {
            assert!(matches!(
                f.average(500.0, 500.0),
                Err(Error::InvalidWavelengthRange { .. })
            ));
            assert!(matches!(
                f.average(600.0, 500.0),
                Err(Error::InvalidWavelengthRange { .. })
            ));
            assert!(matches!(
                f.sample(500.0, 400.0, 4),
                Err(Error::InvalidWavelengthRange { .. })
            ));
            assert!(matches!(
                f.sample(Float::NAN, 400.0, 4),
                Err(Error::InvalidWavelengthRange { .. })
            ));
            assert!(matches!(
                f.sample(400.0, 500.0, 0),
                Err(Error::InvalidBinCount)
            ));
        }
    }

    #[test]
    fn integrate_is_oriented() {
        for f in functions() {
            assert_approx_eq!(
                Float,
                -f.integrate(420.0, 610.0),
                f.integrate(610.0, 420.0),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn enum_round_trips_through_json() {
        for f in functions() {
            // Populate the caches so they are part of the saved state.
            let avg = f.average(400.0, 700.0).unwrap();
            let samples = f.sample(400.0, 700.0, 4).unwrap();

            let json = serde_json::to_string(&f).unwrap();
            let restored: SpectralFunction = serde_json::from_str(&json).unwrap();
            assert!(!restored.cache().is_empty());
            assert_eq!(avg, restored.average(400.0, 700.0).unwrap());
            assert_eq!(&samples[..], &restored.sample(400.0, 700.0, 4).unwrap()[..]);
            assert_eq!(f.evaluate(555.0), restored.evaluate(555.0));
        }
    }
}
