//! Raw JSON presets
//!
//! The lossless format: every band field and the preamp are written as-is
//! and read back bit for bit.

use super::number::serialize_number;
use super::to_pretty_json;
use crate::error::Result;
use crate::registry::PresetConverter;
use crate::types::{ConvertedPreset, ExportInput, ImportedPreset};
use serde::{Deserialize, Serialize};
use soul_eq::{sort_by_frequency, Band, FilterType};

#[derive(Serialize)]
struct JsonPreset<'a> {
    name: &'a str,
    #[serde(serialize_with = "serialize_number")]
    preamp: f64,
    bands: Vec<JsonBand<'a>>,
}

#[derive(Serialize)]
struct JsonBand<'a> {
    id: &'a str,
    #[serde(serialize_with = "serialize_number")]
    frequency: f64,
    #[serde(serialize_with = "serialize_number")]
    gain: f64,
    #[serde(serialize_with = "serialize_number")]
    q: f64,
    #[serde(rename = "type")]
    filter_type: FilterType,
}

#[derive(Deserialize)]
struct JsonFile {
    name: Option<String>,
    #[serde(default)]
    preamp: f64,
    #[serde(default)]
    bands: Vec<Band>,
}

/// Converter for the raw JSON format
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl PresetConverter for JsonConverter {
    fn convert(&self, input: &ExportInput) -> ConvertedPreset {
        render_json(input).into()
    }

    fn import(&self, content: &str) -> Option<Result<ImportedPreset>> {
        Some(parse_json(content))
    }
}

/// Render `{name, preamp, bands}` with bands ascending by frequency
pub fn render_json(input: &ExportInput) -> String {
    let sorted = sort_by_frequency(&input.bands);
    let preset = JsonPreset {
        name: &input.profile_name,
        preamp: input.preamp_db,
        bands: sorted
            .iter()
            .map(|b| JsonBand {
                id: &b.id,
                frequency: b.frequency,
                gain: b.gain,
                q: b.q,
                filter_type: b.filter_type,
            })
            .collect(),
    };
    to_pretty_json(&preset)
}

/// Parse a raw JSON preset
///
/// Missing `preamp` reads as 0 and a band without `type` is peaking.
pub fn parse_json(content: &str) -> Result<ImportedPreset> {
    let file: JsonFile = serde_json::from_str(content)?;
    Ok(ImportedPreset {
        name: file.name,
        bands: file.bands,
        preamp_db: file.preamp,
    })
}
