//! Integration tests for sample classification.
//!
//! Tests verify the white rule, the default ranges, calibration files and
//! that every possible sample gets a color.

use cubeguide::color::{CalibrationTable, Classifier, Color, HsvRange, HsvSample, classify, load_calibration};
use cubeguide::frame::rgb_to_hsv;
use cubeguide::frame::mock::reference_rgb;
use proptest::prelude::*;
use tempfile::TempDir;

fn hsv(h: u8, s: u8, v: u8) -> HsvSample {
    HsvSample::new(h, s, v)
}

// ===== Default Ranges =====

#[test]
fn test_reference_colors_classify_as_themselves() {
    let classifier = Classifier::default();
    for color in Color::ALL {
        let rgb = reference_rgb(color);
        let sample = rgb_to_hsv(rgb[0], rgb[1], rgb[2]);
        assert_eq!(classifier.classify(sample), color, "{color:?} sampled as {sample}");
    }
}

#[test]
fn test_white_wins_over_ranges() {
    // Low saturation in the yellow hue band is still white
    assert_eq!(classify(hsv(30, 70, 200), None), Color::White);
    // Calibration cannot override the white rule
    let table = CalibrationTable::from_entries(vec![(
        Color::Blue,
        HsvRange::new((0, 179), (0, 255), (0, 255)),
    )]);
    assert_eq!(classify(hsv(30, 70, 200), Some(&table)), Color::White);
}

#[test]
fn test_high_hue_red_falls_back() {
    assert_eq!(classify(hsv(175, 220, 150), None), Color::Red);
}

// ===== Calibration Files =====

#[test]
fn test_missing_calibration_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let table = load_calibration(&dir.path().join("hsv_calibration.json")).unwrap();
    assert!(table.is_none());
}

#[test]
fn test_calibration_first_match_in_file_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hsv_calibration.json");
    std::fs::write(
        &path,
        r#"{
            "O": {"h": [0, 30], "s": [100, 255], "v": [100, 255]},
            "Y": {"h": [10, 40], "s": [100, 255], "v": [100, 255]}
        }"#,
    )
    .unwrap();

    let classifier = Classifier::new(load_calibration(&path).unwrap());
    // Overlap: orange is listed first
    assert_eq!(classifier.classify(hsv(20, 200, 200)), Color::Orange);
    assert_eq!(classifier.classify(hsv(35, 200, 200)), Color::Yellow);
    // Outside every box: cascade
    assert_eq!(classifier.classify(hsv(100, 200, 200)), Color::Blue);
    assert_eq!(classifier.active_ranges().len(), 2);
}

#[test]
fn test_calibration_replaces_default_table() {
    let table = CalibrationTable::from_json(
        r#"{"G": {"h": [0, 10], "s": [100, 255], "v": [100, 255]}}"#,
    )
    .unwrap();
    // Default table would say red here
    assert_eq!(classify(hsv(3, 200, 150), Some(&table)), Color::Green);
}

#[test]
fn test_empty_calibration_file_keeps_default_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hsv_calibration.json");
    std::fs::write(&path, "{}").unwrap();

    let classifier = Classifier::new(load_calibration(&path).unwrap());
    assert!(classifier.calibration().is_none());
    assert_eq!(classifier.classify(hsv(3, 200, 150)), Color::Red);
}

#[test]
fn test_invalid_calibration_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hsv_calibration.json");
    std::fs::write(&path, r#"{"X": {"h": [0, 10]}}"#).unwrap();
    assert!(load_calibration(&path).is_err());
}

#[test]
fn test_calibration_serializes_in_order() {
    let table = CalibrationTable::from_json(
        r#"{"R": {"h": [0, 5], "s": [1, 2], "v": [3, 4]}, "B": {"h": [100, 120], "s": [1, 2], "v": [3, 4]}}"#,
    )
    .unwrap();
    let json = serde_json::to_string(&table).unwrap();
    assert!(json.find("\"R\"").unwrap() < json.find("\"B\"").unwrap());
}

// ===== Property Tests =====

prop_compose! {
    fn arb_sample()(h in 0u8..=179, s in any::<u8>(), v in any::<u8>()) -> HsvSample {
        HsvSample::new(h, s, v)
    }
}

prop_compose! {
    fn arb_range()(h in (0u8..=179, 0u8..=179), s in (any::<u8>(), any::<u8>()), v in (any::<u8>(), any::<u8>())) -> HsvRange {
        HsvRange::new(
            (h.0.min(h.1), h.0.max(h.1)),
            (s.0.min(s.1), s.0.max(s.1)),
            (v.0.min(v.1), v.0.max(v.1)),
        )
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_white_rule_is_first(sample in arb_sample(), range in arb_range()) {
        let table = CalibrationTable::from_entries(vec![(Color::Green, range)]);
        let is_white = (sample.s < 75 && sample.v > 150) || (sample.s < 90 && sample.v > 180);
        if is_white {
            prop_assert_eq!(classify(sample, Some(&table)), Color::White);
            prop_assert_eq!(classify(sample, None), Color::White);
        }
    }

    #[test]
    fn prop_calibrated_box_matches(sample in arb_sample(), range in arb_range()) {
        let table = CalibrationTable::from_entries(vec![(Color::Blue, range)]);
        let is_white = (sample.s < 75 && sample.v > 150) || (sample.s < 90 && sample.v > 180);
        if !is_white && range.contains(sample) {
            prop_assert_eq!(classify(sample, Some(&table)), Color::Blue);
        }
    }

    #[test]
    fn prop_classification_is_deterministic(sample in arb_sample()) {
        prop_assert_eq!(classify(sample, None), classify(sample, None));
    }
}
