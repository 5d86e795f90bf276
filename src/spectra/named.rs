//! Built-in spectral functions.
//!
//! Each is built once on first use. Callers receive a clone, so every user
//! owns a separate cache.

use once_cell::sync::Lazy;

use super::{ConstantSF, NumericallyIntegratedSF, Sellmeier, SpectralFunction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedSpectrum {
    /// Refractive index of N-BK7 crown glass.
    GlassBk7,
    /// Reflects everything at every wavelength.
    UnitReflectance,
    /// Absorbs everything at every wavelength.
    Black,
}

impl NamedSpectrum {
    pub fn get(self) -> SpectralFunction {
        match self {
            NamedSpectrum::GlassBk7 => GLASS_BK7_ETA.clone(),
            NamedSpectrum::UnitReflectance => UNIT_REFLECTANCE.clone(),
            NamedSpectrum::Black => BLACK.clone(),
        }
    }
}

static GLASS_BK7_ETA: Lazy<SpectralFunction> = Lazy::new(|| {
    SpectralFunction::Sellmeier(NumericallyIntegratedSF::from_parts(Sellmeier::BK7, 1.0))
});

static UNIT_REFLECTANCE: Lazy<SpectralFunction> =
    Lazy::new(|| SpectralFunction::Constant(ConstantSF::new(1.0)));

static BLACK: Lazy<SpectralFunction> =
    Lazy::new(|| SpectralFunction::Constant(ConstantSF::new(0.0)));
