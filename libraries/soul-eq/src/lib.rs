//! Parametric EQ modelling for Soul Player
//!
//! This crate provides:
//! - Band and profile model (peaking, low shelf, high shelf)
//! - Audio EQ Cookbook biquad coefficients with input hardening
//! - Combined frequency response of cascaded bands
//! - Auto-gain compensation weighted by programme-material tilt
//! - Wavelet curves for exploratory, preview-only curve shaping
//!
//! Everything here is pure math over immutable inputs. The one external
//! collaborator is the [`FilterResponseProvider`] passed to auto-gain.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐     ┌──────────────┐     ┌───────────────────┐
//! │  Band    │ ──► │   Biquad     │ ──► │ Frequency Response│
//! └──────────┘     └──────────────┘     └───────────────────┘
//!                                          │            │
//!                                          ▼            ▼
//!                                   ┌───────────┐  ┌──────────────┐
//!                                   │ Auto-Gain │  │ Preset Export│
//!                                   └───────────┘  └──────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use soul_eq::{combined_magnitude_at, log_frequencies, Band, REFERENCE_SAMPLE_RATE};
//!
//! let bands = [Band::peaking(1000.0, 4.0, 1.41), Band::low_shelf(105.0, 5.5, 0.7)];
//! let freqs = log_frequencies(20.0, 20000.0, 128);
//! let curve = combined_magnitude_at(&bands, &freqs, REFERENCE_SAMPLE_RATE);
//!
//! assert_eq!(curve.len(), 128);
//! ```

#![deny(unsafe_code)]

pub mod auto_gain;
pub mod band;
pub mod biquad;
mod config;
mod error;
pub mod response;
pub mod wavelet;

pub use auto_gain::{
    calculate_auto_gain_db, calculate_auto_gain_db_for, calculate_auto_gain_db_with,
    BiquadResponseProvider,
    FilterResponseProvider, FilterStage,
};
pub use band::{sort_by_frequency, Band, FilterType, Profile};
pub use biquad::{BiquadCoefficients, MAX_SHELF_Q, MIN_Q, REFERENCE_SAMPLE_RATE};
pub use self::config::EqEngineConfig;
pub use error::{EqError, Result};
pub use response::{
    band_response, combined_magnitude_at, db_to_gain, gain_to_db, log_frequencies,
    FrequencyResponse,
};
pub use wavelet::{Wavelet, WaveletController, WaveletField};

/// Default lower bound of the analysis grid (Hz)
pub const MIN_ANALYSIS_FREQUENCY: f64 = 20.0;

/// Default upper bound of the analysis grid (Hz)
pub const MAX_ANALYSIS_FREQUENCY: f64 = 20000.0;

/// Default number of points on the analysis grid
pub const ANALYSIS_POINTS: usize = 128;
