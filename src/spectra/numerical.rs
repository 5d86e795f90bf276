use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::{
    error::{Error, Result},
    Float,
};

use super::{SpectralCache, SpectralFunctionI};

/// A function of wavelength with no closed-form integral.
pub trait ContinuousFunction {
    fn function(&self, wavelength: Float) -> Float;
}

/// Integrates a [`ContinuousFunction`] with a fixed-step midpoint rule.
/// The step is never wider than `sample_resolution` nanometers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericallyIntegratedSF<F> {
    function: F,
    #[serde(deserialize_with = "positive_resolution")]
    sample_resolution: Float,
    #[serde(default)]
    cache: SpectralCache,
}

fn positive_resolution<'de, D>(deserializer: D) -> std::result::Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    let resolution = Float::deserialize(deserializer)?;
    if resolution > 0.0 {
        Ok(resolution)
    } else {
        Err(D::Error::custom(Error::InvalidSampleResolution(resolution)))
    }
}

impl<F: ContinuousFunction> NumericallyIntegratedSF<F> {
    pub fn new(function: F, sample_resolution: Float) -> Result<NumericallyIntegratedSF<F>> {
        if !(sample_resolution > 0.0) {
            return Err(Error::InvalidSampleResolution(sample_resolution));
        }
        Ok(NumericallyIntegratedSF::from_parts(function, sample_resolution))
    }

    /// Callers guarantee sample_resolution > 0.
    pub(super) fn from_parts(function: F, sample_resolution: Float) -> NumericallyIntegratedSF<F> {
        debug_assert!(sample_resolution > 0.0);
        NumericallyIntegratedSF {
            function,
            sample_resolution,
            cache: SpectralCache::new(),
        }
    }

    pub fn function(&self) -> &F {
        &self.function
    }

    pub fn sample_resolution(&self) -> Float {
        self.sample_resolution
    }
}

impl<F: ContinuousFunction> SpectralFunctionI for NumericallyIntegratedSF<F> {
    fn evaluate(&self, wavelength: Float) -> Float {
        self.function.function(wavelength)
    }

    fn integrate(&self, min_wavelength: Float, max_wavelength: Float) -> Float {
        let width = max_wavelength - min_wavelength;
        if !width.is_finite() {
            return Float::NAN;
        }
        let count = Float::max(1.0, (width.abs() / self.sample_resolution).ceil()) as usize;
        let step = width / count as Float;
        (0..count)
            .map(|i| {
                let midpoint = min_wavelength + (i as Float + 0.5) * step;
                self.function.function(midpoint) * step
            })
            .sum()
    }

    fn cache(&self) -> &SpectralCache {
        &self.cache
    }
}
