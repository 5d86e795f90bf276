use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    Float,
};

use super::ContinuousFunction;

/// Normalized blackbody spectrum where the maximum value at any wavelength is 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BlackbodyParams", into = "BlackbodyParams")]
pub struct Blackbody {
    /// Temperature K
    temperature: Float,
    /// Normalization factor s.t. the maximum value is 1.0.
    normalization_factor: Float,
}

#[derive(Serialize, Deserialize)]
struct BlackbodyParams {
    temperature: Float,
}

impl Blackbody {
    pub fn new(temperature: Float) -> Result<Blackbody> {
        if !(temperature > 0.0) || !temperature.is_finite() {
            return Err(Error::InvalidTemperature(temperature));
        }
        let lambda_max = 2.8977721e-3 / temperature; // Wien's displacement law
        let peak = Blackbody::planck(lambda_max * 1e9, temperature);
        let normalization_factor = if peak > 0.0 { 1.0 / peak } else { 0.0 };
        Ok(Blackbody {
            temperature,
            normalization_factor,
        })
    }

    pub fn temperature(&self) -> Float {
        self.temperature
    }

    /// The emitted radiance for blackbody at wavelength lambda (nanometers) at temperature (kelvin).
    fn planck(lambda: Float, temperature: Float) -> Float {
        if temperature <= 0.0 || lambda <= 0.0 {
            return 0.0;
        }
        let c: Float = 299792458.0;
        let h: Float = 6.62606957e-34;
        let kb: Float = 1.3806488e-23;
        // Convert to meters
        let l = lambda * 1e-9;
        let e = Float::exp((h * c) / (l * kb * temperature));
        if !e.is_finite() {
            return 0.0;
        }
        let le = (2.0 * h * c * c) / (l.powi(5) * (e - 1.0));
        debug_assert!(!le.is_nan());
        le
    }
}

impl ContinuousFunction for Blackbody {
    fn function(&self, wavelength: Float) -> Float {
        Blackbody::planck(wavelength, self.temperature) * self.normalization_factor
    }
}

impl TryFrom<BlackbodyParams> for Blackbody {
    type Error = Error;

    fn try_from(params: BlackbodyParams) -> Result<Self> {
        Blackbody::new(params.temperature)
    }
}

impl From<Blackbody> for BlackbodyParams {
    fn from(b: Blackbody) -> Self {
        BlackbodyParams {
            temperature: b.temperature,
        }
    }
}

/// Refractive index from the three-term Sellmeier dispersion equation,
/// n^2 = 1 + sum(B_i * l^2 / (l^2 - C_i)) with l in micrometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sellmeier {
    pub b: [Float; 3],
    /// Micrometers squared.
    pub c: [Float; 3],
}

impl Sellmeier {
    /// Schott N-BK7 borosilicate crown glass.
    pub const BK7: Sellmeier = Sellmeier {
        b: [1.039_612_1, 0.231_792_34, 1.010_469_5],
        c: [0.006_000_698_7, 0.020_017_914, 103.560_65],
    };
}

impl ContinuousFunction for Sellmeier {
    fn function(&self, wavelength: Float) -> Float {
        let l2 = (wavelength * 1e-3) * (wavelength * 1e-3);
        let n2 = 1.0
            + self
                .b
                .iter()
                .zip(self.c.iter())
                .map(|(b, c)| b * l2 / (l2 - c))
                .sum::<Float>();
        n2.max(0.0).sqrt()
    }
}
