//! Wavelet curve synthesizer
//!
//! A generative gain-vs-frequency curve built from windowed sinusoids laid
//! out on a normalized log-frequency axis (`t = 0` at 20 Hz, `t = 1` at
//! 20 kHz). Each [`Wavelet`] contributes
//! `amplitude * sin(t * frequency * pi + phase) * window * edge_envelope(t)`.
//!
//! Wavelet curves are preview-only. They are persisted on a profile but
//! never converted into bands, so they do not reach playback or exports.

use crate::error::{EqError, Result};
use crate::response::log_frequencies;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Lowest frequency of the curve's axis
pub const CURVE_MIN_FREQUENCY: f64 = 20.0;

/// Highest frequency of the curve's axis
pub const CURVE_MAX_FREQUENCY: f64 = 20000.0;

/// Minimum oscillation frequency (cycles across the spectrum)
pub const MIN_WAVELET_FREQUENCY: f64 = 0.1;

/// Falloff range; at 1.0 or above the window is disabled
pub const MIN_FALLOFF: f64 = 0.01;
pub const MAX_FALLOFF: f64 = 1.0;

/// Width of the taper at each end of the axis
const EDGE_WIDTH: f64 = 0.05;

/// One windowed sinusoid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wavelet {
    /// Cycles across the spectrum (continuous, >= 0.1)
    pub frequency: f64,
    /// Amplitude in [-1, 1]
    pub amplitude: f64,
    /// Phase in radians, wrapped to [0, 2pi)
    pub phase: f64,
    /// Window center as a normalized log position in [0, 1]
    pub center_freq: f64,
    /// Window radius in [0.01, 1]
    pub falloff: f64,
}

impl Default for Wavelet {
    /// Neutral wavelet: zero amplitude, so it contributes nothing
    fn default() -> Self {
        Self {
            frequency: 1.0,
            amplitude: 0.0,
            phase: 0.0,
            center_freq: 0.5,
            falloff: MAX_FALLOFF,
        }
    }
}

impl Wavelet {
    /// Copy with every field clamped to its valid range
    ///
    /// Non-finite fields fall back to the neutral default.
    pub fn clamped(&self) -> Self {
        let mut w = Self::default();
        for field in WaveletField::ALL {
            let value = field.get(self);
            if value.is_finite() {
                field.set(&mut w, value);
            }
        }
        w
    }

    /// Contribution of this wavelet at normalized position `t`
    fn value_at(&self, t: f64) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }

        let window = if self.falloff >= MAX_FALLOFF {
            1.0
        } else {
            let distance = (t - self.center_freq).abs();
            if distance < self.falloff {
                0.5 * (1.0 + (PI * distance / self.falloff).cos())
            } else {
                0.0
            }
        };

        let oscillation = (t * self.frequency * PI + self.phase).sin();
        self.amplitude * oscillation * window * edge_envelope(t)
    }
}

/// Editable wavelet field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaveletField {
    Frequency,
    Amplitude,
    Phase,
    CenterFreq,
    Falloff,
}

impl WaveletField {
    pub const ALL: [WaveletField; 5] = [
        Self::Frequency,
        Self::Amplitude,
        Self::Phase,
        Self::CenterFreq,
        Self::Falloff,
    ];

    fn get(&self, w: &Wavelet) -> f64 {
        match self {
            Self::Frequency => w.frequency,
            Self::Amplitude => w.amplitude,
            Self::Phase => w.phase,
            Self::CenterFreq => w.center_freq,
            Self::Falloff => w.falloff,
        }
    }

    /// Store `value` with this field's clamp applied
    fn set(&self, w: &mut Wavelet, value: f64) {
        match self {
            Self::Frequency => w.frequency = value.max(MIN_WAVELET_FREQUENCY),
            Self::Amplitude => w.amplitude = value.clamp(-1.0, 1.0),
            Self::Phase => w.phase = wrap_phase(value),
            Self::CenterFreq => w.center_freq = value.clamp(0.0, 1.0),
            Self::Falloff => w.falloff = value.clamp(MIN_FALLOFF, MAX_FALLOFF),
        }
    }
}

/// Wrap a phase into [0, 2pi)
pub fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Normalized log position of `frequency` on the 20 Hz - 20 kHz axis
///
/// The input is clamped to the axis first, so the result is in [0, 1].
pub fn normalized_position(frequency: f64) -> f64 {
    let f = frequency.clamp(CURVE_MIN_FREQUENCY, CURVE_MAX_FREQUENCY);
    (f / CURVE_MIN_FREQUENCY).log10() / (CURVE_MAX_FREQUENCY / CURVE_MIN_FREQUENCY).log10()
}

/// Raised-cosine taper over the first and last 5% of the axis
pub fn edge_envelope(t: f64) -> f64 {
    if t < EDGE_WIDTH {
        0.5 * (1.0 - (PI * t / EDGE_WIDTH).cos())
    } else if t > 1.0 - EDGE_WIDTH {
        0.5 * (1.0 - (PI * (1.0 - t) / EDGE_WIDTH).cos())
    } else {
        1.0
    }
}

/// Owner of an ordered wavelet list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveletController {
    wavelets: Vec<Wavelet>,
}

impl WaveletController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller seeded with (clamped) wavelets
    pub fn from_wavelets(wavelets: &[Wavelet]) -> Self {
        Self {
            wavelets: wavelets.iter().map(Wavelet::clamped).collect(),
        }
    }

    pub fn wavelets(&self) -> &[Wavelet] {
        &self.wavelets
    }

    pub fn len(&self) -> usize {
        self.wavelets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelets.is_empty()
    }

    /// Append a neutral wavelet and return its index
    pub fn add_wavelet(&mut self) -> usize {
        self.wavelets.push(Wavelet::default());
        self.wavelets.len() - 1
    }

    /// Remove and return the wavelet at `index`
    pub fn remove_wavelet(&mut self, index: usize) -> Result<Wavelet> {
        self.check_index(index)?;
        Ok(self.wavelets.remove(index))
    }

    /// Update one field of one wavelet
    ///
    /// The value is clamped for the field. A non-finite value leaves the
    /// field unchanged.
    pub fn update_wavelet(&mut self, index: usize, field: WaveletField, value: f64) -> Result<()> {
        self.check_index(index)?;
        if value.is_finite() {
            field.set(&mut self.wavelets[index], value);
        }
        Ok(())
    }

    /// Curve value at `frequency_hz`
    ///
    /// Not a fixed dB range; bounded by the sum of absolute amplitudes.
    pub fn value_at_frequency(&self, frequency_hz: f64) -> f64 {
        let t = normalized_position(frequency_hz);
        self.wavelets.iter().map(|w| w.value_at(t)).sum()
    }

    /// `count` log-spaced `(Hz, value)` pairs across 20 Hz - 20 kHz
    pub fn generate_curve_points(&self, count: usize) -> Vec<(f64, f64)> {
        log_frequencies(CURVE_MIN_FREQUENCY, CURVE_MAX_FREQUENCY, count)
            .into_iter()
            .map(|f| (f, self.value_at_frequency(f)))
            .collect()
    }

    /// Plain copies of the wavelets for persistence
    pub fn export_wavelets(&self) -> Vec<Wavelet> {
        self.wavelets.clone()
    }

    /// Replace the wavelets with an imported list
    ///
    /// `None` or an empty list leaves the current wavelets untouched.
    pub fn import_wavelets(&mut self, wavelets: Option<&[Wavelet]>) {
        match wavelets {
            Some(list) if !list.is_empty() => {
                self.wavelets = list.iter().map(Wavelet::clamped).collect();
            }
            _ => tracing::debug!("Ignoring empty wavelet import"),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.wavelets.len() {
            Ok(())
        } else {
            Err(EqError::WaveletIndexOutOfRange {
                index,
                len: self.wavelets.len(),
            })
        }
    }
}
