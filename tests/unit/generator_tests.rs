//! 预警文本生成测试

use crate::helpers::{csv_content, fixed_now, SAMPLE_ROWS};
use chrono::Utc;
use spas::models::{AlertSeverity, AlertType, PowerReading, Region, RegionLoad};
use spas::repositories::parse_regions;
use spas::services::alert_generator::{derive_reading_alerts, derive_region_alerts};

fn sample() -> RegionLoad {
    parse_regions(&csv_content(SAMPLE_ROWS), fixed_now())
}

fn region<'a>(load: &'a RegionLoad, name: &str) -> &'a Region {
    load.find(name).unwrap()
}

fn reading(voltage: f64, frequency: f64) -> PowerReading {
    let now = Utc::now();
    PowerReading {
        id: "r-1".to_string(),
        device_id: "meter-01".to_string(),
        location: "Osu".to_string(),
        region: "Greater Accra".to_string(),
        voltage,
        frequency,
        current: None,
        power: None,
        timestamp: now,
        created_at: now,
    }
}

#[test]
fn test_active_outage_alert_only() {
    let load = sample();
    let alerts = derive_region_alerts(region(&load, "Greater Accra"));

    assert_eq!(
        alerts,
        vec!["ACTIVE OUTAGES: 1 outage(s) reported in Greater Accra".to_string()]
    );
}

#[test]
fn test_voltage_alert_precedes_stability_alert() {
    let load = sample();
    let alerts = derive_region_alerts(region(&load, "ashanti"));

    assert_eq!(
        alerts,
        vec![
            "UNDERVOLTAGE: Risk of appliance malfunction in Ashanti".to_string(),
            "LOW POWER STABILITY: 65% stability in Ashanti".to_string(),
        ]
    );
}

#[test]
fn test_frequency_instability_alert() {
    let load = sample();
    let alerts = derive_region_alerts(region(&load, "Northern"));

    assert_eq!(
        alerts,
        vec!["FREQUENCY INSTABILITY: Power quality issue detected in Northern".to_string()]
    );
}

#[test]
fn test_overvoltage_region_alert() {
    let rows = ["Volta,50.0,255.0,Rising,,,0,250.0,50.0,95%"];
    let load = parse_regions(&csv_content(&rows), fixed_now());
    let alerts = derive_region_alerts(&load.regions[0]);

    assert_eq!(
        alerts,
        vec!["OVERVOLTAGE: Risk of appliance damage in Volta".to_string()]
    );
}

#[test]
fn test_healthy_reading_has_no_alerts() {
    assert!(derive_reading_alerts(&reading(230.0, 50.0)).is_empty());
    // 低压但未到危险线
    assert!(derive_reading_alerts(&reading(210.0, 50.0)).is_empty());
}

#[test]
fn test_reading_alerts_carry_type_and_severity() {
    let alerts = derive_reading_alerts(&reading(185.0, 51.5));

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].alert_type, AlertType::Undervoltage);
    assert_eq!(alerts[0].severity, AlertSeverity::High);
    assert_eq!(alerts[0].message, "UNDERVOLTAGE: Voltage is 185V at Osu");
    assert_eq!(alerts[1].alert_type, AlertType::FrequencyInstability);
    assert_eq!(alerts[1].severity, AlertSeverity::Medium);
    assert_eq!(alerts[1].message, "FREQUENCY INSTABILITY: Frequency is 51.5Hz at Osu");
    assert_eq!(alerts[1].region, "Greater Accra");
}

#[test]
fn test_overvoltage_reading_alert() {
    let alerts = derive_reading_alerts(&reading(255.5, 50.0));

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].alert_type, AlertType::Overvoltage);
    assert_eq!(alerts[0].message, "OVERVOLTAGE: Voltage is 255.5V at Osu");
}
