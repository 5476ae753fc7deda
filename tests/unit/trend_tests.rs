//! 趋势模拟测试

use crate::helpers::{csv_content, fixed_now, SAMPLE_ROWS};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spas::models::{NoiseProfile, RegionLoad, TrendBaseline, TrendRange};
use spas::repositories::parse_regions;
use spas::services::{select_baseline, TrendSynthesizer};
use spas::AppError;

fn synthesizer(seed: u64) -> TrendSynthesizer<StdRng> {
    TrendSynthesizer::new(StdRng::seed_from_u64(seed))
}

fn baseline(voltage: f64, frequency: f64, stability: f64) -> TrendBaseline {
    TrendBaseline {
        voltage,
        frequency,
        stability,
    }
}

#[test]
fn test_series_length_per_range() {
    let mut synth = synthesizer(1);
    let base = baseline(230.0, 50.0, 90.0);

    for (range, expected) in [
        (TrendRange::Day, 24),
        (TrendRange::Week, 28),
        (TrendRange::Month, 30),
    ] {
        let points = synth.synthesize(base, NoiseProfile::REGION, range, fixed_now());
        assert_eq!(points.len(), expected, "{:?}", range);
    }
}

#[test]
fn test_points_are_oldest_first() {
    let points = synthesizer(2).synthesize(
        baseline(230.0, 50.0, 90.0),
        NoiseProfile::REGION,
        TrendRange::Day,
        fixed_now(),
    );

    assert_eq!(points[0].timestamp, fixed_now() - Duration::hours(24));
    assert_eq!(points[0].time, "12:00");
    assert_eq!(points[23].timestamp, fixed_now() - Duration::hours(1));
    assert!(points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn test_daily_labels_for_long_ranges() {
    let points = synthesizer(3).synthesize(
        baseline(230.0, 50.0, 90.0),
        NoiseProfile::REGION,
        TrendRange::Month,
        fixed_now(),
    );

    assert_eq!(points[0].time, "Apr 1");
    assert_eq!(points[29].time, "Apr 30");
}

#[test]
fn test_noise_stays_within_half_span() {
    let base = baseline(230.0, 50.0, 80.0);
    let points =
        synthesizer(4).synthesize(base, NoiseProfile::REGION, TrendRange::Month, fixed_now());

    for p in &points {
        assert!((p.voltage - 230.0).abs() <= 5.0, "voltage {}", p.voltage);
        assert!((p.frequency - 50.0).abs() <= 0.5, "frequency {}", p.frequency);
        assert!((p.stability - 80.0).abs() <= 10.0, "stability {}", p.stability);
    }
}

#[test]
fn test_values_are_clamped() {
    let base = baseline(259.0, 51.9, 99.0);
    let points =
        synthesizer(5).synthesize(base, NoiseProfile::REGION, TrendRange::Month, fixed_now());

    for p in &points {
        assert!((200.0..=260.0).contains(&p.voltage));
        assert!((48.0..=52.0).contains(&p.frequency));
        assert!((0.0..=100.0).contains(&p.stability));
    }
}

#[test]
fn test_same_seed_same_series() {
    let base = baseline(230.0, 50.0, 90.0);
    let a = synthesizer(42).synthesize(base, NoiseProfile::AGGREGATE, TrendRange::Week, fixed_now());
    let b = synthesizer(42).synthesize(base, NoiseProfile::AGGREGATE, TrendRange::Week, fixed_now());

    assert_eq!(a, b);
}

#[test]
fn test_region_baseline_uses_region_averages() {
    let load = parse_regions(&csv_content(SAMPLE_ROWS), fixed_now());

    let (base, noise) = select_baseline(&load, Some("greater accra")).unwrap().unwrap();
    assert_eq!(base, baseline(229.8, 50.0, 92.0));
    assert_eq!(noise, NoiseProfile::REGION);
}

#[test]
fn test_aggregate_baseline_is_mean_of_regions() {
    let load = parse_regions(&csv_content(SAMPLE_ROWS), fixed_now());

    let (base, noise) = select_baseline(&load, None).unwrap().unwrap();
    assert!((base.voltage - (229.8 + 190.0 + 226.0) / 3.0).abs() < 1e-9);
    assert!((base.frequency - (50.0 + 49.9 + 51.2) / 3.0).abs() < 1e-9);
    assert!((base.stability - (92.0 + 65.0 + 78.0) / 3.0).abs() < 1e-9);
    assert_eq!(noise, NoiseProfile::AGGREGATE);
}

#[test]
fn test_unknown_region_is_not_found() {
    let load = parse_regions(&csv_content(SAMPLE_ROWS), fixed_now());

    let err = assert_err!(select_baseline(&load, Some("Atlantis")));
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_empty_dataset_has_no_baseline() {
    let load = RegionLoad::default();
    assert!(select_baseline(&load, None).unwrap().is_none());
}
