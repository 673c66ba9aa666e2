//! Export value types

use crate::error::Result;
use crate::filename;
use serde::{Deserialize, Serialize};
use soul_eq::{Band, EqEngineConfig, Profile, REFERENCE_SAMPLE_RATE};
use std::fmt;
use std::path::{Path, PathBuf};

/// Platform a preset format targets, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    MacOs,
    Windows,
    Android,
    CrossPlatform,
}

impl Platform {
    /// Display order used when grouping formats
    pub const ORDER: [Platform; 4] = [
        Self::MacOs,
        Self::Windows,
        Self::Android,
        Self::CrossPlatform,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Android => "Android",
            Self::CrossPlatform => "Cross-platform",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Static description of a preset format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatMetadata {
    pub id: &'static str,
    pub display_name: &'static str,
    pub platform: Platform,
    /// Extension including the leading dot
    pub file_extension: &'static str,
    pub mime_type: &'static str,
    pub description: &'static str,
    pub import_instructions: &'static str,
}

impl FormatMetadata {
    /// `"{profile name} - {display name}{extension}"` with the profile name sanitized
    pub fn file_name(&self, profile_name: &str) -> String {
        format!(
            "{} - {}{}",
            filename::sanitize_file_name(profile_name),
            self.display_name,
            self.file_extension
        )
    }
}

/// What to export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportInput {
    pub profile_name: String,
    pub bands: Vec<Band>,
    pub preamp_db: f64,
    /// Rate used by formats that sample the response curve
    pub sample_rate: f64,
}

impl ExportInput {
    pub fn new(profile_name: impl Into<String>, bands: Vec<Band>, preamp_db: f64) -> Self {
        Self {
            profile_name: profile_name.into(),
            bands,
            preamp_db,
            sample_rate: REFERENCE_SAMPLE_RATE,
        }
    }

    pub fn from_profile(profile: &Profile) -> Self {
        Self::new(profile.name.clone(), profile.bands.clone(), profile.preamp_db)
    }

    /// Profile rendered at the engine's configured sample rate
    pub fn from_profile_with(profile: &Profile, config: &EqEngineConfig) -> Self {
        Self::from_profile(profile).with_sample_rate(config.sample_rate)
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

/// Lossy conversions the caller should know about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportWarning {
    /// The format holds fewer bands than the profile has
    BandsTruncated { kept: usize, dropped: usize },
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BandsTruncated { kept, dropped } => write!(
                f,
                "Format supports {kept} bands; {dropped} highest-frequency bands were dropped"
            ),
        }
    }
}

/// Output of a converter before file naming
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedPreset {
    pub content: String,
    pub warnings: Vec<ExportWarning>,
}

impl From<String> for ConvertedPreset {
    fn from(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }
}

/// Finished preset file
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    pub content: String,
    pub file_name: String,
    pub mime_type: String,
    pub warnings: Vec<ExportWarning>,
}

impl ExportResult {
    /// Write the content to `dir/file_name` and return the full path
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.content)?;
        tracing::debug!("Wrote preset {:?} ({} bytes)", path, self.content.len());
        Ok(path)
    }
}

/// Profile data recovered from a preset file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedPreset {
    pub name: Option<String>,
    pub bands: Vec<Band>,
    pub preamp_db: f64,
}

impl ImportedPreset {
    /// Turn into a profile, falling back to `default_name`
    pub fn into_profile(self, default_name: &str) -> Profile {
        Profile::new(self.name.unwrap_or_else(|| default_name.to_string()))
            .with_bands(self.bands)
            .with_preamp_db(self.preamp_db)
    }
}
