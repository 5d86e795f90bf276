use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{error::Result, Float};

use super::{check_band, check_bins, SpectralCache, SpectralFunctionI};

/// The same value at every wavelength.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantSF {
    value: Float,
    #[serde(default)]
    cache: SpectralCache,
}

impl ConstantSF {
    pub fn new(value: Float) -> ConstantSF {
        ConstantSF {
            value,
            cache: SpectralCache::new(),
        }
    }

    pub fn value(&self) -> Float {
        self.value
    }
}

impl SpectralFunctionI for ConstantSF {
    fn evaluate(&self, _wavelength: Float) -> Float {
        self.value
    }

    fn integrate(&self, min_wavelength: Float, max_wavelength: Float) -> Float {
        self.value * (max_wavelength - min_wavelength)
    }

    fn cache(&self) -> &SpectralCache {
        &self.cache
    }

    fn average(&self, min_wavelength: Float, max_wavelength: Float) -> Result<Float> {
        check_band(min_wavelength, max_wavelength)?;
        Ok(self.value)
    }

    fn sample(
        &self,
        min_wavelength: Float,
        max_wavelength: Float,
        bins: usize,
    ) -> Result<Arc<[Float]>> {
        check_band(min_wavelength, max_wavelength)?;
        check_bins(bins)?;
        Ok(self
            .cache
            .sample(min_wavelength, max_wavelength, bins, || vec![self.value; bins]))
    }
}
