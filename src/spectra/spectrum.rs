use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    vecmath::HasNan,
    Float,
};

use super::{bin_bounds, check_band, check_bins, SpectralCache, SpectralFunctionI};

const PLANCK: Float = 6.626_070_15e-34;
const SPEED_OF_LIGHT: Float = 299_792_458.0;

/// Radiance sampled on a regular grid of `bins` equal-width bins spanning
/// [min_wavelength, max_wavelength]. Units are W/m^2/str/nm.
///
/// As a spectral function it is a histogram: the value at a wavelength is the
/// sample of the bin containing it, and zero outside the band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SpectrumState", into = "SpectrumState")]
pub struct Spectrum {
    min_wavelength: Float,
    max_wavelength: Float,
    delta_wavelength: Float,
    samples: Vec<Float>,
    cache: SpectralCache,
}

#[derive(Serialize, Deserialize)]
struct SpectrumState {
    min_wavelength: Float,
    max_wavelength: Float,
    samples: Vec<Float>,
    #[serde(default)]
    cache: SpectralCache,
}

impl Spectrum {
    /// A zero spectrum.
    pub fn new(min_wavelength: Float, max_wavelength: Float, bins: usize) -> Result<Spectrum> {
        check_band(min_wavelength, max_wavelength)?;
        check_bins(bins)?;
        Ok(Spectrum::new_unchecked(min_wavelength, max_wavelength, bins))
    }

    pub fn from_samples(
        min_wavelength: Float,
        max_wavelength: Float,
        samples: Vec<Float>,
    ) -> Result<Spectrum> {
        let mut spectrum = Spectrum::new(min_wavelength, max_wavelength, samples.len())?;
        spectrum.samples = samples;
        Ok(spectrum)
    }

    /// Callers guarantee a valid band and bins > 0.
    pub(crate) fn new_unchecked(
        min_wavelength: Float,
        max_wavelength: Float,
        bins: usize,
    ) -> Spectrum {
        debug_assert!(check_band(min_wavelength, max_wavelength).is_ok());
        debug_assert!(bins > 0);
        Spectrum {
            min_wavelength,
            max_wavelength,
            delta_wavelength: (max_wavelength - min_wavelength) / bins as Float,
            samples: vec![0.0; bins],
            cache: SpectralCache::new(),
        }
    }

    pub fn min_wavelength(&self) -> Float {
        self.min_wavelength
    }

    pub fn max_wavelength(&self) -> Float {
        self.max_wavelength
    }

    pub fn bins(&self) -> usize {
        self.samples.len()
    }

    /// Width of each bin.
    pub fn delta_wavelength(&self) -> Float {
        self.delta_wavelength
    }

    /// Centre wavelength of each bin.
    pub fn wavelengths(&self) -> Vec<Float> {
        (0..self.bins())
            .map(|i| self.min_wavelength + (i as Float + 0.5) * self.delta_wavelength)
            .collect()
    }

    pub fn samples(&self) -> &[Float] {
        &self.samples
    }

    /// Mutable access to the samples. Clears the cache.
    pub fn samples_mut(&mut self) -> &mut [Float] {
        self.cache.clear();
        &mut self.samples
    }

    pub fn is_compatible(&self, min_wavelength: Float, max_wavelength: Float, bins: usize) -> bool {
        self.min_wavelength == min_wavelength
            && self.max_wavelength == max_wavelength
            && self.bins() == bins
    }

    pub fn is_zero(&self) -> bool {
        self.samples.iter().all(|s| *s == 0.0)
    }

    /// Integrated radiance over the whole band, W/m^2/str.
    pub fn total(&self) -> Float {
        self.samples.iter().sum::<Float>() * self.delta_wavelength
    }

    /// Sets every sample to zero.
    pub fn clear(&mut self) {
        self.samples_mut().iter_mut().for_each(|s| *s = 0.0);
    }

    pub fn mul_scalar(&mut self, value: Float) {
        self.samples_mut().iter_mut().for_each(|s| *s *= value);
    }

    pub fn div_scalar(&mut self, value: Float) {
        let reciprocal = 1.0 / value;
        self.mul_scalar(reciprocal);
        debug_assert!(!self.samples.has_nan());
    }

    /// Element-wise multiplication; `values` must have one entry per bin.
    pub fn mul_array(&mut self, values: &[Float]) -> Result<()> {
        self.check_length(values)?;
        self.samples_mut()
            .iter_mut()
            .zip(values)
            .for_each(|(s, v)| *s *= v);
        Ok(())
    }

    /// Element-wise addition; `values` must have one entry per bin.
    pub fn add_array(&mut self, values: &[Float]) -> Result<()> {
        self.check_length(values)?;
        self.samples_mut()
            .iter_mut()
            .zip(values)
            .for_each(|(s, v)| *s += v);
        Ok(())
    }

    /// Adds a spectrum on the same grid.
    pub fn add_spectrum(&mut self, other: &Spectrum) -> Result<()> {
        if !self.is_compatible(other.min_wavelength, other.max_wavelength, other.bins()) {
            return Err(Error::IncompatibleSpectrum);
        }
        self.add_array(&other.samples)
    }

    /// Converts from energy to photon radiance, photons/s/m^2/str/nm.
    pub fn to_photons(&self) -> Spectrum {
        let mut photons = Spectrum::new_unchecked(self.min_wavelength, self.max_wavelength, self.bins());
        for ((p, s), wavelength) in photons
            .samples
            .iter_mut()
            .zip(&self.samples)
            .zip(self.wavelengths())
        {
            *p = s * (wavelength * 1e-9) / (PLANCK * SPEED_OF_LIGHT);
        }
        photons
    }

    fn check_length(&self, values: &[Float]) -> Result<()> {
        if values.len() == self.samples.len() {
            Ok(())
        } else {
            Err(Error::IncompatibleSpectrum)
        }
    }
}

impl SpectralFunctionI for Spectrum {
    fn evaluate(&self, wavelength: Float) -> Float {
        if !(wavelength >= self.min_wavelength && wavelength < self.max_wavelength) {
            return 0.0;
        }
        let index = ((wavelength - self.min_wavelength) / self.delta_wavelength) as usize;
        self.samples[index.min(self.bins() - 1)]
    }

    fn integrate(&self, min_wavelength: Float, max_wavelength: Float) -> Float {
        if max_wavelength < min_wavelength {
            return -self.integrate(max_wavelength, min_wavelength);
        }
        let lower = Float::max(min_wavelength, self.min_wavelength);
        let upper = Float::min(max_wavelength, self.max_wavelength);
        if !(upper > lower) {
            return 0.0;
        }
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let (bin_lower, bin_upper) =
                    bin_bounds(self.min_wavelength, self.max_wavelength, self.bins(), i);
                let overlap = Float::min(upper, bin_upper) - Float::max(lower, bin_lower);
                if overlap > 0.0 {
                    s * overlap
                } else {
                    0.0
                }
            })
            .sum()
    }

    fn cache(&self) -> &SpectralCache {
        &self.cache
    }
}

impl TryFrom<SpectrumState> for Spectrum {
    type Error = Error;

    fn try_from(state: SpectrumState) -> Result<Self> {
        let mut spectrum =
            Spectrum::from_samples(state.min_wavelength, state.max_wavelength, state.samples)?;
        spectrum.cache = state.cache;
        Ok(spectrum)
    }
}

impl From<Spectrum> for SpectrumState {
    fn from(s: Spectrum) -> Self {
        SpectrumState {
            min_wavelength: s.min_wavelength,
            max_wavelength: s.max_wavelength,
            samples: s.samples,
            cache: s.cache,
        }
    }
}
