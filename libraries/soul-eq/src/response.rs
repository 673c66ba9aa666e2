//! Frequency-response evaluation
//!
//! Evaluates `H(e^jw) = (b0 + b1 e^-jw + b2 e^-2jw) / (a0 + a1 e^-jw + a2 e^-2jw)`
//! for cascaded bands. Magnitudes in dB are summed across bands, which is the
//! same as multiplying linear magnitudes of filters in series.

use crate::band::Band;
use crate::biquad::{self, BiquadCoefficients};
use std::f64::consts::PI;

/// Magnitude and phase of a filter at a set of frequencies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyResponse {
    /// Linear magnitude per frequency
    pub magnitudes: Vec<f64>,
    /// Phase in radians per frequency
    pub phases: Vec<f64>,
}

impl FrequencyResponse {
    /// Magnitudes converted to dB
    pub fn magnitudes_db(&self) -> Vec<f64> {
        self.magnitudes.iter().map(|&m| gain_to_db(m)).collect()
    }
}

/// Convert a linear gain to dB
pub fn gain_to_db(gain: f64) -> f64 {
    20.0 * gain.log10()
}

/// Convert dB to a linear gain
pub fn db_to_gain(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// `count` geometrically spaced frequencies from `min` to `max` inclusive
///
/// The first element is exactly `min` and the last exactly `max`.
/// A count of 1 yields `[min]`; a count of 0 yields an empty vector.
pub fn log_frequencies(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let ratio = max / min;
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| match i {
                    0 => min,
                    i if i == count - 1 => max,
                    i => min * ratio.powf(i as f64 / last),
                })
                .collect()
        }
    }
}

/// Real and imaginary parts of numerator and denominator at angular frequency `w`
fn transfer_parts(c: &BiquadCoefficients, w: f64) -> ((f64, f64), (f64, f64)) {
    let (sin_w, cos_w) = w.sin_cos();
    let (sin_2w, cos_2w) = (2.0 * w).sin_cos();

    let num_re = c.b0 + c.b1 * cos_w + c.b2 * cos_2w;
    let num_im = -(c.b1 * sin_w + c.b2 * sin_2w);
    let den_re = c.a0 + c.a1 * cos_w + c.a2 * cos_2w;
    let den_im = -(c.a1 * sin_w + c.a2 * sin_2w);

    ((num_re, num_im), (den_re, den_im))
}

/// Magnitude in dB of one stage at `frequency`
///
/// A zero denominator is treated as a transparent stage (0 dB).
pub fn magnitude_db(c: &BiquadCoefficients, frequency: f64, sample_rate: f64) -> f64 {
    let w = 2.0 * PI * frequency / sample_rate;
    let ((num_re, num_im), (den_re, den_im)) = transfer_parts(c, w);

    let den_mag_sq = den_re * den_re + den_im * den_im;
    if den_mag_sq == 0.0 {
        return 0.0;
    }
    let num_mag_sq = num_re * num_re + num_im * num_im;

    10.0 * (num_mag_sq / den_mag_sq).max(f64::MIN_POSITIVE).log10()
}

/// Combined magnitude in dB of all bands at each frequency
///
/// An empty band list gives an all-zero response.
pub fn combined_magnitude_at(bands: &[Band], frequencies: &[f64], sample_rate: f64) -> Vec<f64> {
    let stages: Vec<BiquadCoefficients> = bands
        .iter()
        .map(|band| biquad::calculate(band, sample_rate))
        .collect();

    frequencies
        .iter()
        .map(|&f| {
            stages
                .iter()
                .fold(0.0, |total, c| total + magnitude_db(c, f, sample_rate))
        })
        .collect()
}

/// Linear magnitude and phase of a single band
pub fn band_response(band: &Band, frequencies: &[f64], sample_rate: f64) -> FrequencyResponse {
    coefficients_response(&biquad::calculate(band, sample_rate), frequencies, sample_rate)
}

/// Linear magnitude and phase of a coefficient set
pub fn coefficients_response(
    c: &BiquadCoefficients,
    frequencies: &[f64],
    sample_rate: f64,
) -> FrequencyResponse {
    let mut response = FrequencyResponse {
        magnitudes: Vec::with_capacity(frequencies.len()),
        phases: Vec::with_capacity(frequencies.len()),
    };

    for &f in frequencies {
        let w = 2.0 * PI * f / sample_rate;
        let ((num_re, num_im), (den_re, den_im)) = transfer_parts(c, w);
        let den_mag_sq = den_re * den_re + den_im * den_im;

        if den_mag_sq == 0.0 {
            response.magnitudes.push(1.0);
            response.phases.push(0.0);
            continue;
        }

        // H = num / den = num * conj(den) / |den|^2
        let re = (num_re * den_re + num_im * den_im) / den_mag_sq;
        let im = (num_im * den_re - num_re * den_im) / den_mag_sq;
        response.magnitudes.push(re.hypot(im));
        response.phases.push(im.atan2(re));
    }

    response
}
