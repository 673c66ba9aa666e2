//! eqMac advanced equalizer preset
//!
//! ```json
//! {
//!   "name": "HD 600",
//!   "global": { "gain": -6.2 },
//!   "bands": [{ "frequency": 105, "gain": 5.5, "q": 0.7, "type": "lowshelf" }]
//! }
//! ```
//!
//! Values are written unrounded.

use super::number::serialize_number;
use super::to_pretty_json;
use crate::error::Result;
use crate::registry::PresetConverter;
use crate::types::{ConvertedPreset, ExportInput, ImportedPreset};
use serde::{Deserialize, Serialize};
use soul_eq::{sort_by_frequency, Band, FilterType};

#[derive(Serialize)]
struct EqMacPreset<'a> {
    name: &'a str,
    global: EqMacGlobal,
    bands: Vec<EqMacBand>,
}

#[derive(Serialize, Deserialize)]
struct EqMacGlobal {
    #[serde(serialize_with = "serialize_number")]
    gain: f64,
}

#[derive(Serialize, Deserialize)]
struct EqMacBand {
    #[serde(serialize_with = "serialize_number")]
    frequency: f64,
    #[serde(serialize_with = "serialize_number")]
    gain: f64,
    #[serde(serialize_with = "serialize_number")]
    q: f64,
    #[serde(rename = "type", default)]
    filter_type: FilterType,
}

#[derive(Deserialize)]
struct EqMacFile {
    name: Option<String>,
    global: Option<EqMacGlobal>,
    #[serde(default)]
    bands: Vec<EqMacBand>,
}

/// Converter for eqMac JSON presets
#[derive(Debug, Clone, Copy, Default)]
pub struct EqMacConverter;

impl PresetConverter for EqMacConverter {
    fn convert(&self, input: &ExportInput) -> ConvertedPreset {
        render_eqmac(input).into()
    }

    fn import(&self, content: &str) -> Option<Result<ImportedPreset>> {
        Some(parse_eqmac(content))
    }
}

/// Render an eqMac preset, bands ascending by frequency
pub fn render_eqmac(input: &ExportInput) -> String {
    let preset = EqMacPreset {
        name: &input.profile_name,
        global: EqMacGlobal {
            gain: input.preamp_db,
        },
        bands: sort_by_frequency(&input.bands)
            .iter()
            .map(|b| EqMacBand {
                frequency: b.frequency,
                gain: b.gain,
                q: b.q,
                filter_type: b.filter_type,
            })
            .collect(),
    };
    to_pretty_json(&preset)
}

/// Parse an eqMac preset
///
/// eqMac bands carry no id, so imported bands are numbered `band-1`,
/// `band-2`, ... in file order.
pub fn parse_eqmac(content: &str) -> Result<ImportedPreset> {
    let file: EqMacFile = serde_json::from_str(content)?;

    Ok(ImportedPreset {
        name: file.name,
        bands: file
            .bands
            .into_iter()
            .enumerate()
            .map(|(i, b)| {
                Band::new(format!("band-{}", i + 1), b.frequency, b.gain, b.q, b.filter_type)
            })
            .collect(),
        preamp_db: file.global.map_or(0.0, |g| g.gain),
    })
}
