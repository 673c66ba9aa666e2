/// EQ engine configuration
use crate::biquad::REFERENCE_SAMPLE_RATE;
use crate::error::{EqError, Result};
use crate::{ANALYSIS_POINTS, MAX_ANALYSIS_FREQUENCY, MIN_ANALYSIS_FREQUENCY};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by the response, auto-gain and GraphicEQ paths
///
/// Every field has a default, so an empty TOML file is a valid config.
///
/// ```toml
/// sample_rate = 44100
/// response_points = 256
/// signal_tilt_db_per_octave = -3.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EqEngineConfig {
    /// Sample rate the biquad stages are designed for
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    #[serde(default = "default_min_frequency")]
    pub min_frequency: f64,

    #[serde(default = "default_max_frequency")]
    pub max_frequency: f64,

    /// Number of log-spaced points on the analysis grid
    #[serde(default = "default_response_points")]
    pub response_points: usize,

    /// Assumed spectral tilt of programme material above `min_frequency`
    #[serde(default = "default_signal_tilt")]
    pub signal_tilt_db_per_octave: f64,
}

impl EqEngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Same settings at a different sample rate
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate < 1.0 {
            return Err(EqError::InvalidSampleRate(self.sample_rate));
        }

        if !(self.min_frequency > 0.0 && self.min_frequency < self.max_frequency)
            || !self.max_frequency.is_finite()
        {
            return Err(EqError::Config(format!(
                "Frequency range {}..{} Hz is invalid",
                self.min_frequency, self.max_frequency
            )));
        }

        if self.response_points < 2 {
            return Err(EqError::Config(format!(
                "response_points must be at least 2 (got {})",
                self.response_points
            )));
        }

        if !self.signal_tilt_db_per_octave.is_finite() {
            return Err(EqError::Config(
                "signal_tilt_db_per_octave must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_sample_rate() -> f64 {
    REFERENCE_SAMPLE_RATE
}

fn default_min_frequency() -> f64 {
    MIN_ANALYSIS_FREQUENCY
}

fn default_max_frequency() -> f64 {
    MAX_ANALYSIS_FREQUENCY
}

fn default_response_points() -> usize {
    ANALYSIS_POINTS
}

fn default_signal_tilt() -> f64 {
    -4.5
}

impl Default for EqEngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            min_frequency: default_min_frequency(),
            max_frequency: default_max_frequency(),
            response_points: default_response_points(),
            signal_tilt_db_per_octave: default_signal_tilt(),
        }
    }
}
