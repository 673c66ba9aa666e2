//! Built-in preset formats

mod aunbandeq;
mod apo;
mod eqmac;
mod graphic_eq;
mod json;
pub mod number;

pub use aunbandeq::{q_to_bandwidth, render_aunbandeq, AunBandEqConverter, MAX_BANDS};
pub use apo::{parse_apo, render_apo, ApoConverter};
pub use eqmac::{parse_eqmac, render_eqmac, EqMacConverter};
pub use graphic_eq::{render_graphic_eq, GraphicEqConverter, GRAPHIC_EQ_POINTS};
pub use json::{parse_json, render_json, JsonConverter};

use serde::Serialize;

/// Pretty-printed JSON with two-space indentation
///
/// The preset documents are plain structs with string keys, which
/// `serde_json` always serializes; a failure is logged and yields an empty
/// document.
fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize preset: {}", e);
        String::new()
    })
}
