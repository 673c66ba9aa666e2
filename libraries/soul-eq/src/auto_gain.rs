//! Automatic gain compensation for EQ boosts
//!
//! Computes how far the whole signal has to be turned down so EQ boosts do
//! not clip. Boosts are weighted by the spectral tilt of typical programme
//! material (energy falls off about 4.5 dB per octave above 20 Hz), so a
//! treble boost needs less compensation than the same boost in the bass.
//!
//! # Example
//!
//! ```
//! use soul_eq::{calculate_auto_gain_db, Band, BiquadResponseProvider};
//!
//! let provider = BiquadResponseProvider::new(48000.0);
//! let bands = [Band::low_shelf(100.0, 6.0, 0.707)];
//!
//! let gain = calculate_auto_gain_db(&bands, &provider).unwrap();
//! assert!(gain < -5.0 && gain > -6.5);
//! ```

use crate::band::{Band, FilterType};
use crate::config::EqEngineConfig;
use crate::error::{EqError, Result};
use crate::response::{self, gain_to_db, FrequencyResponse};

/// Weighted gains closer to zero than this are treated as no boost
const BOOST_EPSILON_DB: f64 = 1e-9;

/// A filter whose response can be queried
pub trait FilterStage {
    /// Linear magnitude and phase at each frequency
    fn frequency_response(&self, frequencies: &[f64]) -> FrequencyResponse;
}

/// Creates filter stages whose responses drive auto-gain
///
/// A live audio engine implements this with its own filter objects.
/// [`BiquadResponseProvider`] implements it with the pure coefficient math,
/// so both paths share one sample-rate aware response function.
pub trait FilterResponseProvider {
    fn create_filter_stage(
        &self,
        filter_type: FilterType,
        frequency: f64,
        gain: f64,
        q: f64,
    ) -> Result<Box<dyn FilterStage>>;
}

/// Provider backed by the biquad calculator at a given sample rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadResponseProvider {
    sample_rate: f64,
}

impl BiquadResponseProvider {
    pub fn new(sample_rate: f64) -> Self {
        Self { sample_rate }
    }

    /// Provider designing stages at `config.sample_rate`
    pub fn from_config(config: &EqEngineConfig) -> Self {
        Self::new(config.sample_rate)
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

impl Default for BiquadResponseProvider {
    fn default() -> Self {
        Self::new(crate::biquad::REFERENCE_SAMPLE_RATE)
    }
}

/// Filter stage produced by [`BiquadResponseProvider`]
#[derive(Debug, Clone)]
struct BiquadStage {
    band: Band,
    sample_rate: f64,
}

impl FilterStage for BiquadStage {
    fn frequency_response(&self, frequencies: &[f64]) -> FrequencyResponse {
        response::band_response(&self.band, frequencies, self.sample_rate)
    }
}

impl FilterResponseProvider for BiquadResponseProvider {
    fn create_filter_stage(
        &self,
        filter_type: FilterType,
        frequency: f64,
        gain: f64,
        q: f64,
    ) -> Result<Box<dyn FilterStage>> {
        if !self.sample_rate.is_finite() || self.sample_rate < 1.0 {
            return Err(EqError::InvalidSampleRate(self.sample_rate));
        }
        Ok(Box::new(BiquadStage {
            band: Band::new("", frequency, gain, q, filter_type),
            sample_rate: self.sample_rate,
        }))
    }
}

/// Signal weight in dB at `frequency` for a tilt in dB per octave
///
/// Zero at `reference`, negative above it for a negative tilt.
pub fn signal_weight_db(frequency: f64, reference: f64, tilt_db_per_octave: f64) -> f64 {
    tilt_db_per_octave * (frequency / reference).log2()
}

/// Auto-gain in dB using the default analysis grid
///
/// See [`calculate_auto_gain_db_with`].
pub fn calculate_auto_gain_db<P>(bands: &[Band], provider: &P) -> Result<f64>
where
    P: FilterResponseProvider + ?Sized,
{
    calculate_auto_gain_db_with(bands, provider, &EqEngineConfig::default())
}

/// Auto-gain in dB with the biquad provider at the configured sample rate
pub fn calculate_auto_gain_db_for(bands: &[Band], config: &EqEngineConfig) -> Result<f64> {
    calculate_auto_gain_db_with(bands, &BiquadResponseProvider::from_config(config), config)
}

/// Auto-gain in dB
///
/// Returns 0 for an empty band list without querying the provider.
/// Otherwise sums each band's response on a log-spaced grid, adds the
/// programme-material weighting and returns the negated worst-case weighted
/// boost. The result is always `<= 0`.
///
/// A stage must return one magnitude per grid frequency; anything else is
/// reported as [`EqError::ProviderUnavailable`].
pub fn calculate_auto_gain_db_with<P>(
    bands: &[Band],
    provider: &P,
    config: &EqEngineConfig,
) -> Result<f64>
where
    P: FilterResponseProvider + ?Sized,
{
    if bands.is_empty() {
        return Ok(0.0);
    }

    let frequencies = response::log_frequencies(
        config.min_frequency,
        config.max_frequency,
        config.response_points,
    );

    let mut eq_gain_db = vec![0.0; frequencies.len()];
    for band in bands {
        let stage = provider.create_filter_stage(band.filter_type, band.frequency, band.gain, band.q)?;
        let response = stage.frequency_response(&frequencies);
        if response.magnitudes.len() != frequencies.len() {
            tracing::warn!(
                "Filter stage for {:?} at {} Hz returned {} points for {} frequencies",
                band.filter_type,
                band.frequency,
                response.magnitudes.len(),
                frequencies.len()
            );
            return Err(EqError::ProviderUnavailable(format!(
                "stage returned {} magnitudes for {} frequencies",
                response.magnitudes.len(),
                frequencies.len()
            )));
        }
        for (total, &magnitude) in eq_gain_db.iter_mut().zip(response.magnitudes.iter()) {
            *total += gain_to_db(magnitude);
        }
    }

    let (worst_frequency, max_weighted_gain) = frequencies
        .iter()
        .zip(eq_gain_db.iter())
        .map(|(&f, &gain)| {
            let weight =
                signal_weight_db(f, config.min_frequency, config.signal_tilt_db_per_octave);
            (f, gain + weight)
        })
        .fold((config.min_frequency, f64::NEG_INFINITY), |worst, point| {
            if point.1 > worst.1 {
                point
            } else {
                worst
            }
        });

    tracing::debug!(
        "Auto-gain: worst weighted gain {:.3} dB at {:.1} Hz over {} bands",
        max_weighted_gain,
        worst_frequency,
        bands.len()
    );

    if max_weighted_gain > BOOST_EPSILON_DB {
        Ok(-max_weighted_gain)
    } else {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_weight() {
        assert_eq!(signal_weight_db(20.0, 20.0, -4.5), 0.0);
        assert!((signal_weight_db(40.0, 20.0, -4.5) + 4.5).abs() < 1e-12);
        let top = signal_weight_db(20000.0, 20.0, -4.5);
        assert!((top + 44.85).abs() < 0.01);
    }

    #[test]
    fn test_empty_bands_return_zero() {
        let provider = BiquadResponseProvider::default();
        assert_eq!(calculate_auto_gain_db(&[], &provider), Ok(0.0));
    }

    #[test]
    fn test_cuts_need_no_compensation() {
        let provider = BiquadResponseProvider::default();
        let bands = [
            Band::peaking(1000.0, -6.0, 1.0),
            Band::low_shelf(80.0, -3.0, 0.707),
        ];
        assert_eq!(calculate_auto_gain_db(&bands, &provider), Ok(0.0));
    }

    #[test]
    fn test_bass_boost_is_compensated() {
        let provider = BiquadResponseProvider::default();
        let bands = [Band::peaking(20.0, 6.0, 1.0)];
        let gain = calculate_auto_gain_db(&bands, &provider).unwrap();
        assert!((gain + 6.0).abs() < 0.05, "got {gain}");
    }

    #[test]
    fn test_treble_boost_is_masked_by_tilt() {
        let provider = BiquadResponseProvider::default();
        let bands = [Band::high_shelf(10000.0, 6.0, 0.707)];
        let gain = calculate_auto_gain_db(&bands, &provider).unwrap();
        // Only the shelf's residual lift at 20 Hz remains
        assert!(gain <= 0.0 && gain > -0.01, "got {gain}");
    }

    #[test]
    fn test_provider_from_config_uses_config_rate() {
        let config = EqEngineConfig::default().with_sample_rate(22050.0);
        assert_eq!(BiquadResponseProvider::from_config(&config).sample_rate(), 22050.0);
    }

    #[test]
    fn test_invalid_provider_rate_is_an_error() {
        let provider = BiquadResponseProvider::new(0.0);
        let bands = [Band::peaking(1000.0, 3.0, 1.0)];
        assert_eq!(
            calculate_auto_gain_db(&bands, &provider),
            Err(EqError::InvalidSampleRate(0.0))
        );
    }
}
