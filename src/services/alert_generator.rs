//! 预警文本生成
//!
//! 每次读取时根据区域当前读数重新推导，不写入预警存储。

use crate::models::{
    AlertSeverity, AlertType, Deviation, FrequencyStatus, PowerReading, ReadingAlert, Region,
    StabilityStatus, VoltageStatus, THRESHOLDS,
};
use chrono::Utc;

/// 根据区域读数推导预警文本
///
/// 顺序固定：电压、频率、稳定度、进行中的停电。
pub fn derive_region_alerts(region: &Region) -> Vec<String> {
    let name = &region.region_name;
    let mut alerts = Vec::new();

    match THRESHOLDS.classify_voltage(region.live_voltage) {
        VoltageStatus::Dangerous(Deviation::Low) => alerts.push(format!(
            "UNDERVOLTAGE: Risk of appliance malfunction in {}",
            name
        )),
        VoltageStatus::Dangerous(Deviation::High) => {
            alerts.push(format!("OVERVOLTAGE: Risk of appliance damage in {}", name))
        }
        _ => {}
    }

    if THRESHOLDS.classify_frequency(region.live_frequency) == FrequencyStatus::Unstable {
        alerts.push(format!(
            "FREQUENCY INSTABILITY: Power quality issue detected in {}",
            name
        ));
    }

    if THRESHOLDS.classify_stability(region.power_stability as f64) == StabilityStatus::Poor {
        alerts.push(format!(
            "LOW POWER STABILITY: {}% stability in {}",
            region.power_stability, name
        ));
    }

    if !region.active_outages.is_empty() {
        alerts.push(format!(
            "ACTIVE OUTAGES: {} outage(s) reported in {}",
            region.active_outages.len(),
            name
        ));
    }

    alerts
}

/// 设备上报读数触发的即时预警
pub fn derive_reading_alerts(reading: &PowerReading) -> Vec<ReadingAlert> {
    let now = Utc::now();
    let alert = |alert_type, severity, message: String| ReadingAlert {
        alert_type,
        severity,
        message,
        location: reading.location.clone(),
        region: reading.region.clone(),
        timestamp: now,
    };

    let mut alerts = Vec::new();

    match THRESHOLDS.classify_voltage(reading.voltage) {
        VoltageStatus::Dangerous(Deviation::Low) => alerts.push(alert(
            AlertType::Undervoltage,
            AlertSeverity::High,
            format!(
                "UNDERVOLTAGE: Voltage is {}V at {}",
                reading.voltage, reading.location
            ),
        )),
        VoltageStatus::Dangerous(Deviation::High) => alerts.push(alert(
            AlertType::Overvoltage,
            AlertSeverity::High,
            format!(
                "OVERVOLTAGE: Voltage is {}V at {}",
                reading.voltage, reading.location
            ),
        )),
        _ => {}
    }

    if THRESHOLDS.classify_frequency(reading.frequency) == FrequencyStatus::Unstable {
        alerts.push(alert(
            AlertType::FrequencyInstability,
            AlertSeverity::Medium,
            format!(
                "FREQUENCY INSTABILITY: Frequency is {}Hz at {}",
                reading.frequency, reading.location
            ),
        ));
    }

    alerts
}
