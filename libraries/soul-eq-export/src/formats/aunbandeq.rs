//! AUNBandEQ band sheet
//!
//! Apple's AUNBandEQ exposes at most 16 bands and describes width as
//! bandwidth in octaves rather than Q. The sheet lists each band as a block:
//!
//! ```text
//! Number of Bands: 2
//!
//! Band 1:
//!   Type: Parametric
//!   Frequency: 200 Hz
//!   Gain: 4.0 dB
//!   Bandwidth: 0.7140 octaves
//! ```

use super::number::{round_hz, to_fixed};
use crate::registry::PresetConverter;
use crate::types::{ConvertedPreset, ExportInput, ExportWarning};
use soul_eq::{sort_by_frequency, FilterType};
use std::f64::consts::LN_2;

/// Most bands an AUNBandEQ instance holds
pub const MAX_BANDS: usize = 16;

/// Converter for AUNBandEQ band sheets
#[derive(Debug, Clone, Copy, Default)]
pub struct AunBandEqConverter;

impl PresetConverter for AunBandEqConverter {
    fn convert(&self, input: &ExportInput) -> ConvertedPreset {
        render_aunbandeq(input)
    }
}

/// Bandwidth in octaves of a band with quality factor `q`
///
/// `(2 / ln 2) * asinh(1 / (2q))`, strictly decreasing in `q`.
pub fn q_to_bandwidth(q: f64) -> f64 {
    (2.0 / LN_2) * (1.0 / (2.0 * q)).asinh()
}

fn type_name(filter_type: FilterType) -> &'static str {
    match filter_type {
        FilterType::Peaking => "Parametric",
        FilterType::LowShelf => "LowShelf",
        FilterType::HighShelf => "HighShelf",
    }
}

/// Render the lowest 16 bands by frequency
///
/// The preamp has no AUNBandEQ counterpart and is not written. Dropped bands
/// are reported as [`ExportWarning::BandsTruncated`].
pub fn render_aunbandeq(input: &ExportInput) -> ConvertedPreset {
    let mut sorted = sort_by_frequency(&input.bands);
    let mut warnings = Vec::new();

    if sorted.len() > MAX_BANDS {
        warnings.push(ExportWarning::BandsTruncated {
            kept: MAX_BANDS,
            dropped: sorted.len() - MAX_BANDS,
        });
        sorted.truncate(MAX_BANDS);
    }

    let mut blocks = vec![format!("Number of Bands: {}", sorted.len())];
    for (i, band) in sorted.iter().enumerate() {
        blocks.push(format!(
            "Band {}:\n  Type: {}\n  Frequency: {} Hz\n  Gain: {} dB\n  Bandwidth: {} octaves",
            i + 1,
            type_name(band.filter_type),
            round_hz(band.frequency),
            to_fixed(band.gain, 1),
            to_fixed(q_to_bandwidth(band.q), 4)
        ));
    }

    ConvertedPreset {
        content: blocks.join("\n\n"),
        warnings,
    }
}
