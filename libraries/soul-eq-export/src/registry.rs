//! Export Registry - converter table for preset formats
//!
//! Each format is one [`ExportFormat`] entry: static metadata plus a boxed
//! [`PresetConverter`]. Adding a format means registering one more entry;
//! existing converters are never touched.

use crate::error::{ExportError, Result};
use crate::formats::{
    ApoConverter, AunBandEqConverter, EqMacConverter, GraphicEqConverter, JsonConverter,
};
use crate::types::{ConvertedPreset, ExportInput, ExportResult, FormatMetadata, ImportedPreset, Platform};
use std::fmt::Debug;

/// Turns an [`ExportInput`] into the text of one preset format
///
/// Conversion is total: any input, including an empty band list, produces
/// content. Lossy steps are reported through [`ConvertedPreset::warnings`].
pub trait PresetConverter: Send + Sync {
    fn convert(&self, input: &ExportInput) -> ConvertedPreset;

    /// Parse content produced by this format, if the format can be read back
    fn import(&self, _content: &str) -> Option<Result<ImportedPreset>> {
        None
    }
}

/// A registered format
pub struct ExportFormat {
    pub metadata: FormatMetadata,
    pub converter: Box<dyn PresetConverter>,
}

impl Debug for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportFormat")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl ExportFormat {
    pub fn new(metadata: FormatMetadata, converter: impl PresetConverter + 'static) -> Self {
        Self {
            metadata,
            converter: Box::new(converter),
        }
    }

    /// Convert and attach the file name and MIME type
    pub fn export(&self, input: &ExportInput) -> ExportResult {
        let converted = self.converter.convert(input);
        for warning in &converted.warnings {
            tracing::warn!("{} export of {:?}: {}", self.metadata.display_name, input.profile_name, warning);
        }

        ExportResult {
            content: converted.content,
            file_name: self.metadata.file_name(&input.profile_name),
            mime_type: self.metadata.mime_type.to_string(),
            warnings: converted.warnings,
        }
    }

    /// Parse a preset file of this format
    pub fn import(&self, content: &str) -> Result<ImportedPreset> {
        let preset = self
            .converter
            .import(content)
            .ok_or_else(|| ExportError::ImportUnsupported(self.metadata.id.to_string()))??;

        for band in &preset.bands {
            band.validate()?;
        }
        Ok(preset)
    }
}

const TEXT_PLAIN: &str = "text/plain";
const APPLICATION_JSON: &str = "application/json";

/// Equalizer APO / Peace
pub const EQUALIZER_APO: FormatMetadata = FormatMetadata {
    id: "equalizer-apo",
    display_name: "Equalizer APO",
    platform: Platform::Windows,
    file_extension: ".txt",
    mime_type: TEXT_PLAIN,
    description: "Parametric filters for Equalizer APO and the Peace GUI",
    import_instructions: "Copy the file into Equalizer APO's config folder and include it from config.txt, or load it with Peace.",
};

/// PowerAmp AutoEQ import
pub const POWERAMP: FormatMetadata = FormatMetadata {
    id: "poweramp",
    display_name: "PowerAmp",
    platform: Platform::Android,
    file_extension: ".txt",
    mime_type: TEXT_PLAIN,
    description: "Parametric preset in the AutoEQ text format read by PowerAmp",
    import_instructions: "In PowerAmp open Equalizer, then Presets, then Import and choose this file.",
};

/// AUNBandEQ Audio Unit
pub const AUNBANDEQ: FormatMetadata = FormatMetadata {
    id: "aunbandeq",
    display_name: "AUNBandEQ",
    platform: Platform::MacOs,
    file_extension: ".txt",
    mime_type: TEXT_PLAIN,
    description: "Band settings for Apple's AUNBandEQ, up to 16 bands with bandwidth in octaves",
    import_instructions: "Enter each band's type, frequency, gain and bandwidth in the AUNBandEQ editor of your host.",
};

/// Wavelet GraphicEQ
pub const WAVELET: FormatMetadata = FormatMetadata {
    id: "wavelet",
    display_name: "Wavelet",
    platform: Platform::Android,
    file_extension: ".txt",
    mime_type: TEXT_PLAIN,
    description: "128-point GraphicEQ curve for Wavelet, preamp folded into every point",
    import_instructions: "In Wavelet open the Graphic equalizer, tap Import and choose this file.",
};

/// eqMac
pub const EQMAC: FormatMetadata = FormatMetadata {
    id: "eqmac",
    display_name: "eqMac",
    platform: Platform::MacOs,
    file_extension: ".json",
    mime_type: APPLICATION_JSON,
    description: "Advanced equalizer preset for eqMac",
    import_instructions: "In eqMac switch to the Advanced equalizer, open the preset menu and choose Import.",
};

/// Raw JSON
pub const RAW_JSON: FormatMetadata = FormatMetadata {
    id: "json",
    display_name: "JSON",
    platform: Platform::CrossPlatform,
    file_extension: ".json",
    mime_type: APPLICATION_JSON,
    description: "Lossless band list with preamp for backups and scripting",
    import_instructions: "Import the file back into Soul Player or read it with any JSON tool.",
};

/// Registry of available preset formats
///
/// # Example
///
/// ```
/// use soul_eq::Band;
/// use soul_eq_export::{ExportInput, ExportRegistry};
///
/// let registry = ExportRegistry::new();
/// let input = ExportInput::new("Bright", vec![Band::peaking(2000.0, -3.0, 1.0)], 0.0);
/// let result = registry.export("equalizer-apo", &input).unwrap();
///
/// assert_eq!(result.file_name, "Bright - Equalizer APO.txt");
/// ```
#[derive(Debug)]
pub struct ExportRegistry {
    formats: Vec<ExportFormat>,
}

impl ExportRegistry {
    /// Registry holding the built-in formats
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(ExportFormat::new(EQUALIZER_APO, ApoConverter));
        registry.register(ExportFormat::new(POWERAMP, ApoConverter));
        registry.register(ExportFormat::new(AUNBANDEQ, AunBandEqConverter));
        registry.register(ExportFormat::new(WAVELET, GraphicEqConverter));
        registry.register(ExportFormat::new(EQMAC, EqMacConverter));
        registry.register(ExportFormat::new(RAW_JSON, JsonConverter));
        registry
    }

    /// Registry with no formats
    pub fn empty() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Register a format, replacing any entry with the same id in place
    pub fn register(&mut self, format: ExportFormat) {
        let id = format.metadata.id;
        if let Some(existing) = self.formats.iter_mut().find(|f| f.metadata.id == id) {
            tracing::debug!("Replacing export format: {}", id);
            *existing = format;
        } else {
            tracing::debug!("Registered export format: {}", id);
            self.formats.push(format);
        }
    }

    /// Look up a format by id
    pub fn get(&self, id: &str) -> Result<&ExportFormat> {
        self.formats
            .iter()
            .find(|f| f.metadata.id == id)
            .ok_or_else(|| ExportError::UnknownFormat(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.formats.iter().any(|f| f.metadata.id == id)
    }

    /// Export `input` with the format registered under `id`
    pub fn export(&self, id: &str, input: &ExportInput) -> Result<ExportResult> {
        Ok(self.get(id)?.export(input))
    }

    /// Import a preset file with the format registered under `id`
    pub fn import(&self, id: &str, content: &str) -> Result<ImportedPreset> {
        self.get(id)?.import(content)
    }

    /// Metadata of every format in registration order
    pub fn formats(&self) -> impl Iterator<Item = &FormatMetadata> {
        self.formats.iter().map(|f| &f.metadata)
    }

    /// Formats grouped by platform in display order
    ///
    /// Platforms without formats are left out.
    pub fn grouped_by_platform(&self) -> Vec<(Platform, Vec<&FormatMetadata>)> {
        Platform::ORDER
            .iter()
            .filter_map(|&platform| {
                let group: Vec<_> = self.formats().filter(|m| m.platform == platform).collect();
                (!group.is_empty()).then_some((platform, group))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for ExportRegistry {
    fn default() -> Self {
        Self::new()
    }
}
