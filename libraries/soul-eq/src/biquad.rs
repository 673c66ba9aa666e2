//! Biquad coefficient calculator
//!
//! Closed-form Audio EQ Cookbook formulas (Robert Bristow-Johnson) mapping a
//! [`Band`] to the six coefficients of a second-order IIR stage.
//!
//! Inputs are hardened before use: Q is floored at [`MIN_Q`] and the
//! frequency is kept inside `[1 Hz, 0.45 * fs]` so `alpha = sin(w0) / (2Q)`
//! and the trig terms never degenerate.
//!
//! Shelf Q is capped at [`MAX_SHELF_Q`] (shelf slope S = 1). Above that the
//! cookbook shelf rings past its target gain, so a cut shelf would boost
//! next to its corner.

use crate::band::{Band, FilterType};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Reference sample rate used when the device rate is unknown
pub const REFERENCE_SAMPLE_RATE: f64 = 48000.0;

/// Smallest Q accepted by the coefficient formulas
pub const MIN_Q: f64 = 0.01;

/// Largest shelf Q; the steepest shelf without overshoot
pub const MAX_SHELF_Q: f64 = FRAC_1_SQRT_2;

/// Lowest frequency accepted by the coefficient formulas
pub const MIN_FREQUENCY: f64 = 1.0;

/// Highest usable frequency as a fraction of the sample rate.
/// Keeps w0 well below pi to avoid near-Nyquist instability.
pub const MAX_FREQUENCY_RATIO: f64 = 0.45;

/// Coefficients of one biquad stage (not normalized)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoefficients {
    /// Pass-through stage
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Divide every coefficient by a0
    ///
    /// Returns the identity stage if a0 is zero or not finite.
    pub fn normalized(&self) -> Self {
        if self.a0 == 0.0 || !self.a0.is_finite() {
            return Self::IDENTITY;
        }
        Self {
            b0: self.b0 / self.a0,
            b1: self.b1 / self.a0,
            b2: self.b2 / self.a0,
            a0: 1.0,
            a1: self.a1 / self.a0,
            a2: self.a2 / self.a0,
        }
    }

    /// Whether all coefficients are finite numbers
    pub fn is_finite(&self) -> bool {
        [self.b0, self.b1, self.b2, self.a0, self.a1, self.a2]
            .iter()
            .all(|c| c.is_finite())
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Clamp Q into the range the formulas can handle
pub fn clamp_q(q: f64) -> f64 {
    if q.is_finite() {
        q.max(MIN_Q)
    } else {
        MIN_Q
    }
}

/// Clamp a shelf Q into `[MIN_Q, MAX_SHELF_Q]`
pub fn clamp_shelf_q(q: f64) -> f64 {
    clamp_q(q).min(MAX_SHELF_Q)
}

/// Clamp a frequency into `[MIN_FREQUENCY, MAX_FREQUENCY_RATIO * sample_rate]`
pub fn clamp_frequency(frequency: f64, sample_rate: f64) -> f64 {
    let max = (sample_rate * MAX_FREQUENCY_RATIO).max(MIN_FREQUENCY);
    if frequency.is_finite() {
        frequency.clamp(MIN_FREQUENCY, max)
    } else {
        max
    }
}

/// Calculate the coefficients for a band at the given sample rate
///
/// Invalid sample rates and non-finite gains produce the identity stage.
pub fn calculate(band: &Band, sample_rate: f64) -> BiquadCoefficients {
    calculate_raw(
        band.filter_type,
        band.frequency,
        band.gain,
        band.q,
        sample_rate,
    )
}

/// Calculate coefficients from individual parameters
pub fn calculate_raw(
    filter_type: FilterType,
    frequency: f64,
    gain_db: f64,
    q: f64,
    sample_rate: f64,
) -> BiquadCoefficients {
    if !sample_rate.is_finite() || sample_rate < 1.0 || !gain_db.is_finite() {
        return BiquadCoefficients::IDENTITY;
    }

    let safe_q = match filter_type {
        FilterType::Peaking => clamp_q(q),
        FilterType::LowShelf | FilterType::HighShelf => clamp_shelf_q(q),
    };
    let safe_freq = clamp_frequency(frequency, sample_rate);
    if safe_q != q || safe_freq != frequency {
        tracing::debug!(
            "Clamped band parameters: {} Hz -> {} Hz, Q {} -> {}",
            frequency,
            safe_freq,
            q,
            safe_q
        );
    }

    match filter_type {
        FilterType::Peaking => peaking(sample_rate, safe_freq, safe_q, gain_db),
        FilterType::LowShelf => low_shelf(sample_rate, safe_freq, safe_q, gain_db),
        FilterType::HighShelf => high_shelf(sample_rate, safe_freq, safe_q, gain_db),
    }
}

/// Peaking EQ filter
fn peaking(sample_rate: f64, frequency: f64, q: f64, gain_db: f64) -> BiquadCoefficients {
    let a = 10.0_f64.powf(gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = omega.cos();
    let alpha = omega.sin() / (2.0 * q);

    BiquadCoefficients {
        b0: 1.0 + alpha * a,
        b1: -2.0 * cos_omega,
        b2: 1.0 - alpha * a,
        a0: 1.0 + alpha / a,
        a1: -2.0 * cos_omega,
        a2: 1.0 - alpha / a,
    }
}

/// Low shelf filter
fn low_shelf(sample_rate: f64, frequency: f64, q: f64, gain_db: f64) -> BiquadCoefficients {
    let a = 10.0_f64.powf(gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = omega.cos();
    let alpha = omega.sin() / (2.0 * q);
    let beta = 2.0 * a.sqrt() * alpha;

    BiquadCoefficients {
        b0: a * ((a + 1.0) - (a - 1.0) * cos_omega + beta),
        b1: 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_omega),
        b2: a * ((a + 1.0) - (a - 1.0) * cos_omega - beta),
        a0: (a + 1.0) + (a - 1.0) * cos_omega + beta,
        a1: -2.0 * ((a - 1.0) + (a + 1.0) * cos_omega),
        a2: (a + 1.0) + (a - 1.0) * cos_omega - beta,
    }
}

/// High shelf filter
fn high_shelf(sample_rate: f64, frequency: f64, q: f64, gain_db: f64) -> BiquadCoefficients {
    let a = 10.0_f64.powf(gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = omega.cos();
    let alpha = omega.sin() / (2.0 * q);
    let beta = 2.0 * a.sqrt() * alpha;

    BiquadCoefficients {
        b0: a * ((a + 1.0) + (a - 1.0) * cos_omega + beta),
        b1: -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_omega),
        b2: a * ((a + 1.0) + (a - 1.0) * cos_omega - beta),
        a0: (a + 1.0) - (a - 1.0) * cos_omega + beta,
        a1: 2.0 * ((a - 1.0) - (a + 1.0) * cos_omega),
        a2: (a + 1.0) - (a - 1.0) * cos_omega - beta,
    }
}
