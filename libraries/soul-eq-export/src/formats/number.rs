//! Number formatting shared by the text and JSON grammars

use serde::Serializer;

/// Extra digits inspected when looking for an exact rounding tie
const TIE_CHECK_DIGITS: usize = 40;

/// Fixed-decimal formatting with the rounding other EQ tools use
///
/// Exact ties round away from zero (`2.25` -> `2.3`), unlike Rust's
/// round-half-to-even. An exact `-0` prints without a sign; `-0.04` still
/// prints as `-0.0`.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    let expanded = format!("{:.*}", decimals + 1 + TIE_CHECK_DIGITS, magnitude);
    let cut = expanded.len() - (1 + TIE_CHECK_DIGITS);
    let rest = &expanded[cut..];
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');

    let rounded = if is_tie {
        // Nudge just past the tie so formatting rounds up
        format!("{:.*}", decimals, f64::from_bits(magnitude.to_bits() + 1))
    } else {
        format!("{:.*}", decimals, magnitude)
    };

    if value < 0.0 {
        format!("-{rounded}")
    } else {
        rounded
    }
}

/// Round to the nearest integer, halves away from zero
pub fn round_hz(value: f64) -> i64 {
    value.round() as i64
}

/// Largest integer an f64 represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Serialize an f64 without a trailing `.0` when it holds an integer
///
/// Other values use the shortest round-trip form. Magnitudes below `1e-5`
/// or of `1e16` and above come out in exponent form (`1e-6`, `1e20`) where
/// a browser would write `0.000001` or the full digit string. Either text
/// parses back to the same f64.
pub fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let v = *value;
    if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(v as i64)
    } else {
        serializer.serialize_f64(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(3.0, 1), "3.0");
        assert_eq!(to_fixed(2.25, 1), "2.3");
        assert_eq!(to_fixed(-2.25, 1), "-2.3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.70710678, 4), "0.7071");
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(-0.04, 1), "-0.0");
    }

    #[test]
    fn test_round_hz() {
        assert_eq!(round_hz(105.4), 105);
        assert_eq!(round_hz(105.5), 106);
        assert_eq!(round_hz(19999.9), 20000);
    }

    #[test]
    fn test_serialize_number() {
        #[derive(serde::Serialize)]
        struct Wrapper(#[serde(serialize_with = "serialize_number")] f64);

        assert_eq!(serde_json::to_string(&Wrapper(3.0)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Wrapper(-6.5)).unwrap(), "-6.5");
        assert_eq!(serde_json::to_string(&Wrapper(0.1)).unwrap(), "0.1");
        assert_eq!(serde_json::to_string(&Wrapper(-0.0)).unwrap(), "0");
    }

    #[test]
    fn test_serialize_number_exponent_form_round_trips() {
        #[derive(serde::Serialize)]
        struct Wrapper(#[serde(serialize_with = "serialize_number")] f64);

        for value in [1e-6, -2.5e-7, 1e20, 1.5e300, 5e-324] {
            let text = serde_json::to_string(&Wrapper(value)).unwrap();
            assert!(text.contains('e'), "{value} -> {text}");
            let parsed: f64 = serde_json::from_str(&text).unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits(), "{text}");
        }
        assert_eq!(serde_json::to_string(&Wrapper(1e-6)).unwrap(), "1e-6");
    }
}
