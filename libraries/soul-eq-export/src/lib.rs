//! Preset export for Soul Player EQ profiles
//!
//! This crate provides:
//! - A registry of preset formats grouped by platform
//! - Converters for Equalizer APO, PowerAmp, AUNBandEQ, Wavelet, eqMac and raw JSON
//! - Importers for the APO text, eqMac and raw JSON grammars
//! - File naming with profile names made safe for every file system
//!
//! Output is byte-exact: numbers are rounded the way the receiving
//! applications expect, so a preset exported here is read the same way on
//! every platform.
//!
//! # Example
//!
//! ```
//! use soul_eq::Band;
//! use soul_eq_export::{ExportInput, ExportRegistry};
//!
//! let registry = ExportRegistry::new();
//! let input = ExportInput::new(
//!     "Studio",
//!     vec![Band::peaking(2000.0, -3.0, 1.0), Band::peaking(200.0, 4.0, 2.0)],
//!     3.0,
//! );
//!
//! let apo = registry.export("equalizer-apo", &input).unwrap();
//! assert_eq!(
//!     apo.content,
//!     "Preamp: 3.0 dB\n\
//!      Filter 1: ON PK Fc 200 Hz Gain 4.0 dB Q 2.0000\n\
//!      Filter 2: ON PK Fc 2000 Hz Gain -3.0 dB Q 1.0000"
//! );
//! assert_eq!(apo.mime_type, "text/plain");
//! ```

#![deny(unsafe_code)]

mod error;
pub mod filename;
pub mod formats;
pub mod registry;
mod types;

pub use error::{ExportError, Result};
pub use filename::sanitize_file_name;
pub use formats::{parse_apo, parse_eqmac, parse_json, q_to_bandwidth};
pub use registry::{ExportFormat, ExportRegistry, PresetConverter};
pub use types::{
    ConvertedPreset, ExportInput, ExportResult, ExportWarning, FormatMetadata, ImportedPreset,
    Platform,
};
