use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    math::lerp,
    Float,
};

use super::{SpectralCache, SpectralFunctionI};

/// Piecewise-linear function through tabulated (wavelength, sample) pairs.
/// Outside the table the first and last samples are extended flat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "InterpolatedState", into = "InterpolatedState")]
pub struct InterpolatedSF {
    wavelengths: Vec<Float>,
    samples: Vec<Float>,
    cache: SpectralCache,
}

#[derive(Serialize, Deserialize)]
struct InterpolatedState {
    wavelengths: Vec<Float>,
    samples: Vec<Float>,
    #[serde(default)]
    cache: SpectralCache,
}

impl InterpolatedSF {
    /// The pairs may be given in any order. If `normalise` is set, samples are
    /// scaled so the integral over the tabulated range is one.
    pub fn new(wavelengths: &[Float], samples: &[Float], normalise: bool) -> Result<InterpolatedSF> {
        if wavelengths.len() != samples.len() {
            return Err(Error::MismatchedLengths {
                wavelengths: wavelengths.len(),
                samples: samples.len(),
            });
        }
        if wavelengths.is_empty() {
            return Err(Error::EmptyTable);
        }

        let (wavelengths, samples): (Vec<Float>, Vec<Float>) = wavelengths
            .iter()
            .copied()
            .zip(samples.iter().copied())
            .sorted_by(|a, b| a.0.total_cmp(&b.0))
            .unzip();
        if wavelengths.windows(2).any(|w| w[0] == w[1]) {
            warn!("Interpolated function has repeated wavelengths; the step is taken at the first");
        }

        let mut function = InterpolatedSF {
            wavelengths,
            samples,
            cache: SpectralCache::new(),
        };
        if normalise {
            function.normalise()?;
        }
        Ok(function)
    }

    fn normalise(&mut self) -> Result<()> {
        let (first, last) = self.range();
        let total = self.integrate(first, last);
        if total == 0.0 || !total.is_finite() {
            return Err(Error::ZeroNormalisation);
        }
        debug!("Normalising interpolated function by {}", total);
        self.samples.iter_mut().for_each(|s| *s /= total);
        self.cache.clear();
        Ok(())
    }

    pub fn wavelengths(&self) -> &[Float] {
        &self.wavelengths
    }

    pub fn samples(&self) -> &[Float] {
        &self.samples
    }

    /// Smallest and largest tabulated wavelengths.
    pub fn range(&self) -> (Float, Float) {
        (self.wavelengths[0], self.wavelengths[self.wavelengths.len() - 1])
    }

    /// Linear interpolation within segment i, which must have non-zero width.
    fn segment_value(&self, i: usize, wavelength: Float) -> Float {
        let (w0, w1) = (self.wavelengths[i], self.wavelengths[i + 1]);
        let t = (wavelength - w0) / (w1 - w0);
        lerp(t, &self.samples[i], &self.samples[i + 1])
    }
}

impl SpectralFunctionI for InterpolatedSF {
    fn evaluate(&self, wavelength: Float) -> Float {
        if wavelength.is_nan() {
            return Float::NAN;
        }
        let n = self.wavelengths.len();
        if wavelength <= self.wavelengths[0] {
            return self.samples[0];
        }
        if wavelength >= self.wavelengths[n - 1] {
            return self.samples[n - 1];
        }
        // First entry strictly greater than wavelength; in 1..n here.
        let upper = self.wavelengths.partition_point(|&w| w <= wavelength);
        self.segment_value(upper - 1, wavelength)
    }

    fn integrate(&self, min_wavelength: Float, max_wavelength: Float) -> Float {
        if max_wavelength < min_wavelength {
            return -self.integrate(max_wavelength, min_wavelength);
        }
        let (first, last) = self.range();
        let n = self.samples.len();
        let mut sum = 0.0;

        // Flat extensions.
        if min_wavelength < first {
            sum += self.samples[0] * (Float::min(max_wavelength, first) - min_wavelength);
        }
        if max_wavelength > last {
            sum += self.samples[n - 1] * (max_wavelength - Float::max(min_wavelength, last));
        }

        // Trapezoids over the part of each segment inside the band.
        for i in 0..n - 1 {
            let lower = Float::max(min_wavelength, self.wavelengths[i]);
            let upper = Float::min(max_wavelength, self.wavelengths[i + 1]);
            if upper > lower {
                let a = self.segment_value(i, lower);
                let b = self.segment_value(i, upper);
                sum += 0.5 * (a + b) * (upper - lower);
            }
        }
        sum
    }

    fn cache(&self) -> &SpectralCache {
        &self.cache
    }
}

impl TryFrom<InterpolatedState> for InterpolatedSF {
    type Error = Error;

    fn try_from(state: InterpolatedState) -> Result<Self> {
        let mut function = InterpolatedSF::new(&state.wavelengths, &state.samples, false)?;
        function.cache = state.cache;
        Ok(function)
    }
}

impl From<InterpolatedSF> for InterpolatedState {
    fn from(f: InterpolatedSF) -> Self {
        InterpolatedState {
            wavelengths: f.wavelengths,
            samples: f.samples,
            cache: f.cache,
        }
    }
}
