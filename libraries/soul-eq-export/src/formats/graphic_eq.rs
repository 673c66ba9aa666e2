//! Wavelet GraphicEQ line
//!
//! Wavelet has no parametric bands and no preamp. The combined response is
//! sampled at 128 log-spaced points and the preamp is added to every point:
//!
//! ```text
//! GraphicEQ: 20 -2.1; 21 -2.1; ... ; 20000 -6.0
//! ```

use super::number::{round_hz, to_fixed};
use crate::registry::PresetConverter;
use crate::types::{ConvertedPreset, ExportInput};
use soul_eq::{
    combined_magnitude_at, log_frequencies, ANALYSIS_POINTS, MAX_ANALYSIS_FREQUENCY,
    MIN_ANALYSIS_FREQUENCY,
};

/// Number of points in a Wavelet curve
pub const GRAPHIC_EQ_POINTS: usize = ANALYSIS_POINTS;

/// Converter for Wavelet's GraphicEQ format
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicEqConverter;

impl PresetConverter for GraphicEqConverter {
    fn convert(&self, input: &ExportInput) -> ConvertedPreset {
        render_graphic_eq(input).into()
    }
}

/// Sample the profile into a single `GraphicEQ:` line
pub fn render_graphic_eq(input: &ExportInput) -> String {
    let frequencies = log_frequencies(
        MIN_ANALYSIS_FREQUENCY,
        MAX_ANALYSIS_FREQUENCY,
        GRAPHIC_EQ_POINTS,
    );
    let gains = combined_magnitude_at(&input.bands, &frequencies, input.sample_rate);

    let points: Vec<String> = frequencies
        .iter()
        .zip(&gains)
        .map(|(&f, &g)| format!("{} {}", round_hz(f), to_fixed(g + input.preamp_db, 1)))
        .collect();

    format!("GraphicEQ: {}", points.join("; "))
}
