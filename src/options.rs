use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    spectra::check_band,
    Float,
};

/// Renderer-wide defaults applied to newly created rays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub seed: u64,
    pub min_wavelength: Float,
    pub max_wavelength: Float,
    pub bins: usize,
    pub max_depth: u32,
    pub extinction_prob: Float,
    pub extinction_min_depth: u32,
    pub importance_sampling: bool,
    pub important_path_weight: Float,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 0,
            min_wavelength: 375.0,
            max_wavelength: 740.0,
            bins: 40,
            max_depth: 15,
            extinction_prob: 0.1,
            extinction_min_depth: 3,
            importance_sampling: true,
            important_path_weight: 0.25,
        }
    }
}

impl Options {
    /// Parses options from JSON; missing fields take their default values.
    pub fn from_json(s: &str) -> Result<Options> {
        let options: Options = serde_json::from_str(s)?;
        options.validate()?;
        debug!("Loaded options {:?}", options);
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        check_band(self.min_wavelength, self.max_wavelength)?;
        if self.min_wavelength <= 0.0 {
            return Err(Error::InvalidWavelengthRange {
                min: self.min_wavelength,
                max: self.max_wavelength,
            });
        }
        if self.bins == 0 {
            return Err(Error::InvalidBinCount);
        }
        if !(0.0..1.0).contains(&self.extinction_prob) {
            return Err(Error::InvalidProbability {
                name: "extinction_prob",
                value: self.extinction_prob,
            });
        }
        if !(0.0..=1.0).contains(&self.important_path_weight) {
            return Err(Error::InvalidProbability {
                name: "important_path_weight",
                value: self.important_path_weight,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Error, Float};

    use super::Options;

    #[test]
    fn defaults_are_valid() {
        let options = Options::default();
        assert!(options.validate().is_ok());
        assert_eq!(40, options.bins);
        assert_eq!(15, options.max_depth);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options = Options::from_json(r#"{ "bins": 8, "importance_sampling": false }"#).unwrap();
        assert_eq!(8, options.bins);
        assert!(!options.importance_sampling);
        assert_eq!(375.0, options.min_wavelength);
        assert_eq!(0.25, options.important_path_weight);
    }

    #[test]
    fn invalid_options_rejected() {
        assert!(matches!(
            Options::from_json(r#"{ "bins": 0 }"#),
            Err(Error::InvalidBinCount)
        ));
        assert!(matches!(
            Options::from_json(r#"{ "min_wavelength": 800.0 }"#),
            Err(Error::InvalidWavelengthRange { .. })
        ));
        assert!(matches!(
            Options::from_json(r#"{ "important_path_weight": 1.5 }"#),
            Err(Error::InvalidProbability { .. })
        ));
        assert!(matches!(
            Options::from_json("{ not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn non_finite_band_rejected() {
        let options = Options {
            max_wavelength: Float::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(Error::InvalidWavelengthRange { .. })
        ));
        let options = Options {
            min_wavelength: Float::NAN,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
