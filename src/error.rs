use std::io;

use thiserror::Error;

use crate::Float;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The upper wavelength bound must be strictly greater than the lower one.
    #[error("Invalid wavelength range [{min}, {max}]")]
    InvalidWavelengthRange { min: Float, max: Float },

    #[error("Number of bins must be greater than zero")]
    InvalidBinCount,

    #[error("Sample resolution must be greater than zero, got {0}")]
    InvalidSampleResolution(Float),

    /// Wavelength and sample arrays differ in length.
    #[error("Mismatched array lengths: {wavelengths} wavelengths, {samples} samples")]
    MismatchedLengths { wavelengths: usize, samples: usize },

    #[error("Temperature must be greater than zero kelvin, got {0}")]
    InvalidTemperature(Float),

    #[error("Tabulated data is empty")]
    EmptyTable,

    #[error("Cannot normalise a function whose integral is zero")]
    ZeroNormalisation,

    /// A probability or weight outside its legal range.
    #[error("Invalid probability {name} = {value}")]
    InvalidProbability { name: &'static str, value: Float },

    /// Spectra with different bands or bin counts cannot be combined.
    #[error("Incompatible spectrum")]
    IncompatibleSpectrum,

    #[error("IO error")]
    Io(#[from] io::Error),

    #[error("Unable to parse JSON")]
    Json(#[from] serde_json::Error),
}
