//! 电能质量汇总模型

use super::trend::TrendRange;
use serde::Serialize;

/// 电压分布
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct VoltageSummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub normal: usize,
    pub low: usize,
    pub high: usize,
    pub dangerous: usize,
}

/// 频率分布
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct FrequencySummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub stable: usize,
    pub unstable: usize,
}

/// 稳定度分布
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct StabilitySummary {
    pub average: f64,
    pub excellent: usize,
    pub good: usize,
    pub poor: usize,
}

/// 电能质量汇总
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub voltage: VoltageSummary,
    pub frequency: FrequencySummary,
    pub stability: StabilitySummary,
    pub total_readings: usize,
    pub range: TrendRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// 趋势序列的均值
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendStats {
    pub avg_voltage: f64,
    pub avg_frequency: f64,
    pub avg_stability: f64,
    pub period: TrendRange,
}

/// 稳定度分级计数
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct StabilityLevels {
    pub excellent: usize,
    pub good: usize,
    pub poor: usize,
}

/// 稳定度指标
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StabilityMetrics {
    pub avg_stability: f64,
    pub levels: StabilityLevels,
    pub total_readings: usize,
}

impl From<&QualitySummary> for TrendStats {
    fn from(summary: &QualitySummary) -> Self {
        Self {
            avg_voltage: summary.voltage.average,
            avg_frequency: summary.frequency.average,
            avg_stability: summary.stability.average,
            period: summary.range,
        }
    }
}

impl From<&QualitySummary> for StabilityMetrics {
    fn from(summary: &QualitySummary) -> Self {
        Self {
            avg_stability: summary.stability.average,
            levels: StabilityLevels {
                excellent: summary.stability.excellent,
                good: summary.stability.good,
                poor: summary.stability.poor,
            },
            total_readings: summary.total_readings,
        }
    }
}
