//! 状态分级测试

use spas::models::{RegionStatus, StabilityStatus, THRESHOLDS};

#[test]
fn test_dangerous_low_voltage_badge() {
    let status = RegionStatus::classify(185.0, 50.0, 95.0);
    let json = serde_json::to_value(&status).unwrap();

    assert_eq!(json["voltage"]["status"], "Dangerous");
    assert_eq!(json["voltage"]["color"], "destructive");
    assert_eq!(json["voltage"]["deviation"], "low");
    assert_eq!(json["frequency"]["status"], "Stable");
    assert_eq!(json["stability"]["status"], "Excellent");
}

#[test]
fn test_normal_badges_omit_deviation() {
    let json = serde_json::to_value(RegionStatus::classify(230.0, 50.0, 75.0)).unwrap();

    assert_eq!(json["voltage"]["status"], "Normal");
    assert_eq!(json["voltage"]["color"], "default");
    assert!(json["voltage"].get("deviation").is_none());
    assert_eq!(json["stability"]["status"], "Good");
    assert_eq!(json["stability"]["color"], "secondary");
}

#[test]
fn test_high_voltage_and_unstable_frequency() {
    let json = serde_json::to_value(RegionStatus::classify(245.0, 51.5, 40.0)).unwrap();

    assert_eq!(json["voltage"]["status"], "High");
    assert_eq!(json["voltage"]["deviation"], "high");
    assert_eq!(json["frequency"]["status"], "Unstable");
    assert_eq!(json["frequency"]["color"], "destructive");
    assert_eq!(json["stability"]["status"], "Poor");
}

#[test]
fn test_stability_boundaries() {
    assert_eq!(THRESHOLDS.classify_stability(90.0), StabilityStatus::Excellent);
    assert_eq!(THRESHOLDS.classify_stability(89.9), StabilityStatus::Good);
    assert_eq!(THRESHOLDS.classify_stability(70.0), StabilityStatus::Good);
    assert_eq!(THRESHOLDS.classify_stability(69.9), StabilityStatus::Poor);
}
