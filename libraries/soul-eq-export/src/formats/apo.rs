//! Equalizer APO / Peace text presets
//!
//! PowerAmp's AutoEQ import reads the same grammar:
//!
//! ```text
//! Preamp: -6.2 dB
//! Filter 1: ON LSC Fc 105 Hz Gain 5.5 dB Q 0.7000
//! Filter 2: ON PK Fc 2000 Hz Gain -3.0 dB Q 1.4100
//! ```
//!
//! Frequencies are rounded to whole Hz and gains to 0.1 dB, so a round trip
//! through this format is lossy.

use super::number::{round_hz, to_fixed};
use crate::error::{ExportError, Result};
use crate::registry::PresetConverter;
use crate::types::{ConvertedPreset, ExportInput, ImportedPreset};
use soul_eq::{sort_by_frequency, Band, FilterType};
use std::f64::consts::FRAC_1_SQRT_2;

/// Converter for Equalizer APO style text
#[derive(Debug, Clone, Copy, Default)]
pub struct ApoConverter;

impl PresetConverter for ApoConverter {
    fn convert(&self, input: &ExportInput) -> ConvertedPreset {
        render_apo(input).into()
    }

    fn import(&self, content: &str) -> Option<Result<ImportedPreset>> {
        Some(parse_apo(content))
    }
}

/// Render bands as Equalizer APO text, ascending by frequency
///
/// The preamp line is only written when the preamp is nonzero.
pub fn render_apo(input: &ExportInput) -> String {
    let mut lines = Vec::with_capacity(input.bands.len() + 1);

    if input.preamp_db != 0.0 {
        lines.push(format!("Preamp: {} dB", to_fixed(input.preamp_db, 1)));
    }

    for (i, band) in sort_by_frequency(&input.bands).iter().enumerate() {
        lines.push(format!(
            "Filter {}: ON {} Fc {} Hz Gain {} dB Q {}",
            i + 1,
            band.filter_type.apo_code(),
            round_hz(band.frequency),
            to_fixed(band.gain, 1),
            to_fixed(band.q, 4)
        ));
    }

    lines.join("\n")
}

/// Parse Equalizer APO text back into bands
///
/// Blank lines, `#` comments and unrelated APO commands are skipped, as are
/// filters switched `OFF`. Shelves without a Q get 1/sqrt(2).
pub fn parse_apo(content: &str) -> Result<ImportedPreset> {
    let mut preset = ImportedPreset::default();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("Preamp:") {
            let value = rest.split_whitespace().next().unwrap_or_default();
            preset.preamp_db = parse_number(value, line_no, "preamp")?;
        } else if line.starts_with("Filter") {
            if let Some(band) = parse_filter_line(line, line_no)? {
                preset.bands.push(band.with_id(format!("band-{}", preset.bands.len() + 1)));
            }
        }
    }

    Ok(preset)
}

/// Parse one `Filter N: ON TYPE Fc F Hz Gain G dB Q Q` line
fn parse_filter_line(line: &str, line_no: usize) -> Result<Option<Band>> {
    let (_, fields) = line
        .split_once(':')
        .ok_or_else(|| ExportError::parse(line_no, "missing ':' after filter number"))?;
    let tokens: Vec<&str> = fields.split_whitespace().collect();

    match tokens.first() {
        Some(&"ON") => {}
        Some(&"OFF") => return Ok(None),
        _ => return Err(ExportError::parse(line_no, "expected ON or OFF")),
    }

    let filter_type: FilterType = tokens
        .get(1)
        .ok_or_else(|| ExportError::parse(line_no, "missing filter type"))?
        .parse()
        .map_err(|e: String| ExportError::parse(line_no, e))?;

    let value_after = |key: &str| -> Result<Option<f64>> {
        match tokens.iter().position(|t| *t == key) {
            Some(pos) => {
                let value = tokens
                    .get(pos + 1)
                    .ok_or_else(|| ExportError::parse(line_no, format!("missing value for {key}")))?;
                parse_number(value, line_no, key).map(Some)
            }
            None => Ok(None),
        }
    };

    let frequency =
        value_after("Fc")?.ok_or_else(|| ExportError::parse(line_no, "missing Fc"))?;
    let gain = value_after("Gain")?.unwrap_or(0.0);
    let q = value_after("Q")?.unwrap_or(FRAC_1_SQRT_2);

    Ok(Some(Band::new("", frequency, gain, q, filter_type)))
}

fn parse_number(value: &str, line_no: usize, what: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| ExportError::parse(line_no, format!("invalid {what} value: {value:?}")))
}
