//! Exact-grammar tests for every registered export format
//!
//! Third-party EQ applications parse these files verbatim, so the tests
//! compare text rather than meaning wherever the layout is fixed.

use soul_eq::{Band, EqEngineConfig, Profile};
use soul_eq_export::{ExportInput, ExportRegistry, ExportWarning, Platform};

fn two_band_input() -> ExportInput {
    ExportInput::new(
        "Two Band",
        vec![
            Band::peaking(2000.0, -3.0, 1.0),
            Band::peaking(200.0, 4.0, 2.0),
        ],
        3.0,
    )
}

fn many_bands(count: u32) -> Vec<Band> {
    (0..count)
        .map(|i| Band::peaking(25.0 * 1.35f64.powi(i as i32), 1.0, 1.4))
        .collect()
}

#[test]
fn test_apo_two_band_profile() {
    let registry = ExportRegistry::new();
    let result = registry.export("equalizer-apo", &two_band_input()).unwrap();
    let lines: Vec<&str> = result.content.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Preamp: 3.0 dB");
    assert!(lines[1..].iter().all(|l| l.contains(": ON PK ")));
    assert_eq!(lines[1], "Filter 1: ON PK Fc 200 Hz Gain 4.0 dB Q 2.0000");
    assert_eq!(lines[2], "Filter 2: ON PK Fc 2000 Hz Gain -3.0 dB Q 1.0000");
}

#[test]
fn test_apo_order_independent_of_input_order() {
    let registry = ExportRegistry::new();
    let mut reversed = two_band_input();
    reversed.bands.reverse();

    let a = registry.export("equalizer-apo", &two_band_input()).unwrap();
    let b = registry.export("equalizer-apo", &reversed).unwrap();
    assert_eq!(a.content, b.content);
}

#[test]
fn test_poweramp_matches_apo_except_file_name() {
    let registry = ExportRegistry::new();
    let input = two_band_input();
    let apo = registry.export("equalizer-apo", &input).unwrap();
    let poweramp = registry.export("poweramp", &input).unwrap();

    assert_eq!(apo.content, poweramp.content);
    assert_eq!(apo.file_name, "Two Band - Equalizer APO.txt");
    assert_eq!(poweramp.file_name, "Two Band - PowerAmp.txt");
}

#[test]
fn test_wavelet_single_line_of_128_pairs() {
    let registry = ExportRegistry::new();
    for input in [
        two_band_input(),
        ExportInput::new("Empty", vec![], 0.0),
        ExportInput::new("Many", many_bands(20), -8.0),
    ] {
        let result = registry.export("wavelet", &input).unwrap();
        assert!(!result.content.contains('\n'));

        let body = result.content.strip_prefix("GraphicEQ: ").unwrap();
        let pairs: Vec<&str> = body.split("; ").collect();
        assert_eq!(pairs.len(), 128);
        for pair in pairs {
            let (f, g) = pair.split_once(' ').unwrap();
            f.parse::<i64>().unwrap();
            g.parse::<f64>().unwrap();
        }
    }
}

#[test]
fn test_wavelet_uses_input_sample_rate() {
    let registry = ExportRegistry::new();
    let band = vec![Band::high_shelf(12000.0, 9.0, 0.7)];
    let at_48k = registry
        .export("wavelet", &ExportInput::new("Air", band.clone(), 0.0))
        .unwrap();
    let at_32k = registry
        .export(
            "wavelet",
            &ExportInput::new("Air", band, 0.0).with_sample_rate(32000.0),
        )
        .unwrap();

    assert_ne!(at_48k.content, at_32k.content);
}

#[test]
fn test_wavelet_follows_engine_config_rate() {
    let registry = ExportRegistry::new();
    let profile = Profile::new("Air").with_bands(vec![Band::high_shelf(12000.0, 9.0, 0.7)]);
    let config = EqEngineConfig::from_toml_str("sample_rate = 32000.0").unwrap();

    let input = ExportInput::from_profile_with(&profile, &config);
    assert_eq!(input.sample_rate, 32000.0);

    let configured = registry.export("wavelet", &input).unwrap();
    let explicit = registry
        .export(
            "wavelet",
            &ExportInput::from_profile(&profile).with_sample_rate(32000.0),
        )
        .unwrap();
    let default = registry
        .export("wavelet", &ExportInput::from_profile(&profile))
        .unwrap();
    assert_eq!(configured.content, explicit.content);
    assert_ne!(configured.content, default.content);
}

#[test]
fn test_aunbandeq_truncates_twenty_bands() {
    let registry = ExportRegistry::new();
    let result = registry
        .export("aunbandeq", &ExportInput::new("Twenty", many_bands(20), 0.0))
        .unwrap();

    assert!(result.content.starts_with("Number of Bands: 16\n"));
    let blocks = result
        .content
        .lines()
        .filter(|l| l.starts_with("Band ") && l.ends_with(':'))
        .count();
    assert_eq!(blocks, 16);
    assert_eq!(
        result.warnings,
        [ExportWarning::BandsTruncated { kept: 16, dropped: 4 }]
    );
}

#[test]
fn test_aunbandeq_keeps_lowest_frequencies() {
    let registry = ExportRegistry::new();
    let mut bands = many_bands(17);
    bands.reverse();
    let result = registry
        .export("aunbandeq", &ExportInput::new("Seventeen", bands, 0.0))
        .unwrap();

    // 25 * 1.35^16 is the single band left out
    let dropped = format!("Frequency: {} Hz", (25.0 * 1.35f64.powi(16)).round());
    assert!(!result.content.contains(&dropped));
    assert!(result.content.contains("Frequency: 25 Hz"));
}

#[test]
fn test_small_profiles_have_no_warnings() {
    let registry = ExportRegistry::new();
    for format in registry.formats() {
        let result = registry.export(format.id, &two_band_input()).unwrap();
        assert!(result.warnings.is_empty(), "{} warned", format.id);
    }
}

#[test]
fn test_empty_band_list_every_format() {
    let registry = ExportRegistry::new();
    let input = ExportInput::new("Empty", vec![], -2.0);

    let content = |id: &str| registry.export(id, &input).unwrap().content;
    assert_eq!(content("equalizer-apo"), "Preamp: -2.0 dB");
    assert_eq!(content("poweramp"), "Preamp: -2.0 dB");
    assert_eq!(content("aunbandeq"), "Number of Bands: 0");
    assert!(content("wavelet").starts_with("GraphicEQ: 20 -2.0; "));

    let eqmac: serde_json::Value = serde_json::from_str(&content("eqmac")).unwrap();
    assert_eq!(eqmac["global"]["gain"], -2);
    assert_eq!(eqmac["bands"], serde_json::json!([]));

    let json: serde_json::Value = serde_json::from_str(&content("json")).unwrap();
    assert_eq!(json["preamp"], -2);
    assert_eq!(json["bands"], serde_json::json!([]));
}

#[test]
fn test_file_names_and_mime_types() {
    let registry = ExportRegistry::new();
    let input = ExportInput::new("AC/DC: Live?", vec![], 0.0);

    let expected = [
        ("equalizer-apo", "AC_DC_ Live_ - Equalizer APO.txt", "text/plain"),
        ("poweramp", "AC_DC_ Live_ - PowerAmp.txt", "text/plain"),
        ("aunbandeq", "AC_DC_ Live_ - AUNBandEQ.txt", "text/plain"),
        ("wavelet", "AC_DC_ Live_ - Wavelet.txt", "text/plain"),
        ("eqmac", "AC_DC_ Live_ - eqMac.json", "application/json"),
        ("json", "AC_DC_ Live_ - JSON.json", "application/json"),
    ];
    for (id, file_name, mime_type) in expected {
        let result = registry.export(id, &input).unwrap();
        assert_eq!(result.file_name, file_name);
        assert_eq!(result.mime_type, mime_type);
    }
}

#[test]
fn test_json_formats_keep_raw_profile_name() {
    let registry = ExportRegistry::new();
    let input = ExportInput::new("AC/DC: Live?", vec![], 0.0);
    let result = registry.export("json", &input).unwrap();
    let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(value["name"], "AC/DC: Live?");
}

#[test]
fn test_platform_groups() {
    let registry = ExportRegistry::new();
    let groups: Vec<(Platform, Vec<&str>)> = registry
        .grouped_by_platform()
        .into_iter()
        .map(|(p, formats)| (p, formats.iter().map(|m| m.id).collect()))
        .collect();

    assert_eq!(
        groups,
        [
            (Platform::MacOs, vec!["aunbandeq", "eqmac"]),
            (Platform::Windows, vec!["equalizer-apo"]),
            (Platform::Android, vec!["poweramp", "wavelet"]),
            (Platform::CrossPlatform, vec!["json"]),
        ]
    );
}

#[test]
fn test_export_from_profile() {
    let profile = Profile::new("Profile")
        .with_bands(vec![Band::low_shelf(105.0, 5.5, 0.7)])
        .with_preamp_db(-6.0);
    let registry = ExportRegistry::new();
    let result = registry
        .export("equalizer-apo", &ExportInput::from_profile(&profile))
        .unwrap();

    assert_eq!(
        result.content,
        "Preamp: -6.0 dB\nFilter 1: ON LSC Fc 105 Hz Gain 5.5 dB Q 0.7000"
    );
}

#[test]
fn test_write_to_dir() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ExportRegistry::new();
    let result = registry.export("json", &two_band_input()).unwrap();

    let path = result.write_to_dir(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("Two Band - JSON.json"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), result.content);
}

#[test]
fn test_write_to_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ExportRegistry::new();
    let result = registry.export("json", &two_band_input()).unwrap();

    let missing = dir.path().join("does-not-exist");
    assert!(matches!(
        result.write_to_dir(missing),
        Err(soul_eq_export::ExportError::Io(_))
    ));
}
