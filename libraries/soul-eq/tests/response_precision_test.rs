//! Frequency response precision tests
//!
//! Checks the evaluator against closed-form expectations from the Audio EQ
//! Cookbook: a peaking filter reaches its gain at the center frequency,
//! shelves settle at their gain far from the corner, and cascades add in dB.

use soul_eq::{
    band_response, biquad, combined_magnitude_at, log_frequencies, Band, FilterType,
    REFERENCE_SAMPLE_RATE,
};

/// Tolerance for gain at the center frequency
const CENTER_TOLERANCE_DB: f64 = 0.1;

/// Sample rates a playback device commonly runs at
const SAMPLE_RATES: [f64; 5] = [44100.0, 48000.0, 88200.0, 96000.0, 192000.0];

#[test]
fn test_empty_band_list_is_flat_everywhere() {
    let freqs = log_frequencies(20.0, 20000.0, 128);
    for &fs in &SAMPLE_RATES {
        let response = combined_magnitude_at(&[], &freqs, fs);
        assert_eq!(response.len(), freqs.len());
        assert!(response.iter().all(|&db| db == 0.0));
    }
}

#[test]
fn test_peaking_gain_at_center_for_all_sample_rates() {
    let centers = [31.5, 125.0, 1000.0, 4000.0, 16000.0];
    for &fs in &SAMPLE_RATES {
        for &f0 in &centers {
            for &(gain, q) in &[(6.0, 1.0), (-9.0, 4.3), (12.0, 0.5), (-2.5, 2.0)] {
                let band = Band::peaking(f0, gain, q);
                let db = combined_magnitude_at(&[band], &[f0], fs)[0];
                assert!(
                    (db - gain).abs() < CENTER_TOLERANCE_DB,
                    "{f0} Hz @ {fs} Hz: expected {gain} dB, got {db:.4} dB"
                );
            }
        }
    }
}

#[test]
fn test_peaking_returns_to_unity_far_from_center() {
    let band = Band::peaking(1000.0, 9.0, 4.0);
    let response = combined_magnitude_at(&[band], &[20.0, 20000.0], REFERENCE_SAMPLE_RATE);
    assert!(response[0].abs() < 0.05, "20 Hz: {}", response[0]);
    assert!(response[1].abs() < 0.05, "20 kHz: {}", response[1]);
}

#[test]
fn test_shelf_half_gain_at_corner() {
    // A cookbook shelf passes through half its dB gain at the corner frequency
    for filter_type in [FilterType::LowShelf, FilterType::HighShelf] {
        let band = Band::new("shelf", 1000.0, 8.0, 0.707, filter_type);
        let db = combined_magnitude_at(&[band], &[1000.0], REFERENCE_SAMPLE_RATE)[0];
        assert!((db - 4.0).abs() < 0.05, "{filter_type}: {db}");
    }
}

#[test]
fn test_response_is_order_independent() {
    let bands = vec![
        Band::low_shelf(105.0, 5.5, 0.7),
        Band::peaking(2500.0, -3.2, 2.1),
        Band::high_shelf(9000.0, 2.0, 0.7),
    ];
    let mut reversed = bands.clone();
    reversed.reverse();

    let freqs = log_frequencies(20.0, 20000.0, 64);
    let a = combined_magnitude_at(&bands, &freqs, REFERENCE_SAMPLE_RATE);
    let b = combined_magnitude_at(&reversed, &freqs, REFERENCE_SAMPLE_RATE);
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < 1e-9);
    }
}

#[test]
fn test_degenerate_bands_stay_finite() {
    let bands = vec![
        Band::peaking(1000.0, 6.0, 0.0),
        Band::peaking(1000.0, 6.0, -2.0),
        Band::high_shelf(30000.0, 6.0, 0.7),
        Band::low_shelf(0.0, 3.0, 0.7),
    ];
    let freqs = log_frequencies(20.0, 20000.0, 128);
    let response = combined_magnitude_at(&bands, &freqs, 44100.0);
    assert!(response.iter().all(|db| db.is_finite()));

    for band in &bands {
        assert!(biquad::calculate(band, 44100.0).is_finite());
    }
}

#[test]
fn test_phase_is_zero_for_transparent_band() {
    let band = Band::peaking(1000.0, 0.0, 1.0);
    let freqs = log_frequencies(20.0, 20000.0, 16);
    let response = band_response(&band, &freqs, REFERENCE_SAMPLE_RATE);
    assert!(response.magnitudes.iter().all(|m| (m - 1.0).abs() < 1e-12));
    assert!(response.phases.iter().all(|p| p.abs() < 1e-12));
}

#[test]
fn test_sample_rate_changes_high_frequency_response() {
    // The same band differs between 44.1 kHz and 96 kHz near the top of the band
    let band = Band::peaking(15000.0, 6.0, 1.0);
    let at_44 = combined_magnitude_at(&[band.clone()], &[19000.0], 44100.0)[0];
    let at_96 = combined_magnitude_at(&[band], &[19000.0], 96000.0)[0];
    assert!((at_44 - at_96).abs() > 0.1);
}
