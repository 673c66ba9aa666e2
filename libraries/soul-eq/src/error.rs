//! Error types for EQ modelling

use thiserror::Error;

/// Result type for EQ operations
pub type Result<T> = std::result::Result<T, EqError>;

/// Errors that can occur while modelling an EQ
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EqError {
    /// Band frequency is zero, negative or not a number
    #[error("Invalid frequency: {0} Hz (must be a positive finite value)")]
    InvalidFrequency(f64),

    /// Band Q is zero, negative or not a number
    #[error("Invalid Q: {0} (must be a positive finite value)")]
    InvalidQ(f64),

    /// Band gain is not a finite number
    #[error("Invalid gain: {0} dB")]
    InvalidGain(f64),

    /// Sample rate cannot be used for filter design
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),

    /// Wavelet index does not exist
    #[error("Wavelet index {index} out of range (have {len})")]
    WaveletIndexOutOfRange { index: usize, len: usize },

    /// The filter response provider cannot create filter stages
    #[error("Filter response provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Engine configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for EqError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
