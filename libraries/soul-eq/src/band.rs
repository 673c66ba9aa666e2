//! Band and profile model
//!
//! A [`Band`] describes one parametric filter stage. A [`Profile`] groups
//! bands with a flat preamp offset and the wavelet curve used for previews.
//! The engine only reads profiles; editing is done by the application.

use crate::error::{EqError, Result};
use crate::wavelet::Wavelet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter type for EQ bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Peaking - boosts/cuts around frequency with Q bandwidth
    #[default]
    Peaking,
    /// Low shelf - boosts/cuts below frequency
    LowShelf,
    /// High shelf - boosts/cuts above frequency
    HighShelf,
}

impl FilterType {
    /// All filter types, in display order
    pub const ALL: [FilterType; 3] = [Self::Peaking, Self::LowShelf, Self::HighShelf];

    /// Name used in JSON presets
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Peaking => "peaking",
            Self::LowShelf => "lowshelf",
            Self::HighShelf => "highshelf",
        }
    }

    /// Filter code used by Equalizer APO style text presets
    pub fn apo_code(&self) -> &'static str {
        match self {
            Self::Peaking => "PK",
            Self::LowShelf => "LSC",
            Self::HighShelf => "HSC",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = String;

    /// Accepts both the JSON names and the APO filter codes
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "peaking" | "pk" | "peq" => Ok(Self::Peaking),
            "lowshelf" | "lsc" | "ls" => Ok(Self::LowShelf),
            "highshelf" | "hsc" | "hs" => Ok(Self::HighShelf),
            other => Err(format!("unknown filter type: {other}")),
        }
    }
}

/// EQ band configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Identifier assigned by the application
    #[serde(default)]
    pub id: String,
    /// Center (or corner) frequency in Hz
    pub frequency: f64,
    /// Gain in dB
    pub gain: f64,
    /// Q factor, controls bandwidth
    pub q: f64,
    /// Filter type (shelf or peaking)
    #[serde(rename = "type", default)]
    pub filter_type: FilterType,
}

impl Band {
    /// Create a new band
    pub fn new(
        id: impl Into<String>,
        frequency: f64,
        gain: f64,
        q: f64,
        filter_type: FilterType,
    ) -> Self {
        Self {
            id: id.into(),
            frequency,
            gain,
            q,
            filter_type,
        }
    }

    /// Create a peaking band with an empty id
    pub fn peaking(frequency: f64, gain: f64, q: f64) -> Self {
        Self::new("", frequency, gain, q, FilterType::Peaking)
    }

    /// Create a low shelf band with an empty id
    pub fn low_shelf(frequency: f64, gain: f64, q: f64) -> Self {
        Self::new("", frequency, gain, q, FilterType::LowShelf)
    }

    /// Create a high shelf band with an empty id
    pub fn high_shelf(frequency: f64, gain: f64, q: f64) -> Self {
        Self::new("", frequency, gain, q, FilterType::HighShelf)
    }

    /// Builder-style id assignment
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Check that the band can be turned into a filter stage
    pub fn validate(&self) -> Result<()> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(EqError::InvalidFrequency(self.frequency));
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(EqError::InvalidQ(self.q));
        }
        if !self.gain.is_finite() {
            return Err(EqError::InvalidGain(self.gain));
        }
        Ok(())
    }
}

/// Sort bands by ascending frequency
///
/// The sort is stable, so bands sharing a frequency keep their input order.
pub fn sort_by_frequency(bands: &[Band]) -> Vec<Band> {
    let mut sorted = bands.to_vec();
    sorted.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    sorted
}

/// A named set of bands with a preamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub bands: Vec<Band>,
    /// Flat gain applied to the whole signal, in dB
    #[serde(default)]
    pub preamp_db: f64,
    /// Preview-only wavelet curve
    #[serde(default)]
    pub wavelets: Vec<Wavelet>,
}

impl Profile {
    /// Create an empty profile
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bands: Vec::new(),
            preamp_db: 0.0,
            wavelets: Vec::new(),
        }
    }

    /// Builder-style band list
    pub fn with_bands(mut self, bands: Vec<Band>) -> Self {
        self.bands = bands;
        self
    }

    /// Builder-style preamp
    pub fn with_preamp_db(mut self, preamp_db: f64) -> Self {
        self.preamp_db = preamp_db;
        self
    }

    /// Validate every band and the preamp
    pub fn validate(&self) -> Result<()> {
        if !self.preamp_db.is_finite() {
            return Err(EqError::InvalidGain(self.preamp_db));
        }
        self.bands.iter().try_for_each(Band::validate)
    }

    /// Bands in ascending frequency order
    pub fn sorted_bands(&self) -> Vec<Band> {
        sort_by_frequency(&self.bands)
    }
}
