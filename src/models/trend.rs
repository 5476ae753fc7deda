//! 趋势模拟模型

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 电压钳位区间 (V)
pub const VOLTAGE_CLAMP: (f64, f64) = (200.0, 260.0);
/// 频率钳位区间 (Hz)
pub const FREQUENCY_CLAMP: (f64, f64) = (48.0, 52.0);
/// 稳定度钳位区间 (%)
pub const STABILITY_CLAMP: (f64, f64) = (0.0, 100.0);

/// 回看范围
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TrendRange {
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl TrendRange {
    /// 解析查询参数，未知值回退到 24h
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("7d") => TrendRange::Week,
            Some("30d") => TrendRange::Month,
            _ => TrendRange::Day,
        }
    }

    /// 回看总小时数
    pub fn hours(&self) -> i64 {
        match self {
            TrendRange::Day => 24,
            TrendRange::Week => 168,
            TrendRange::Month => 720,
        }
    }

    /// 桶间隔小时数
    pub fn interval_hours(&self) -> i64 {
        match self {
            TrendRange::Day => 1,
            TrendRange::Week => 6,
            TrendRange::Month => 24,
        }
    }

    /// 桶数量：24 / 28 / 30
    pub fn bucket_count(&self) -> usize {
        (self.hours() / self.interval_hours()) as usize
    }

    /// 第 `index` 个桶的时间（最早的在前）
    pub fn bucket_time(&self, now: DateTime<Utc>, index: usize) -> DateTime<Utc> {
        let offset = self.hours() - index as i64 * self.interval_hours();
        now - Duration::hours(offset)
    }

    pub fn is_hourly(&self) -> bool {
        matches!(self, TrendRange::Day)
    }
}

/// 趋势基线
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendBaseline {
    pub voltage: f64,
    pub frequency: f64,
    pub stability: f64,
}

/// 扰动幅度（总跨度，取值于 ±span/2）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseProfile {
    pub voltage_span: f64,
    pub frequency_span: f64,
    pub stability_span: f64,
}

impl NoiseProfile {
    /// 单区域
    pub const REGION: NoiseProfile = NoiseProfile {
        voltage_span: 10.0,
        frequency_span: 1.0,
        stability_span: 20.0,
    };

    /// 全区域平均
    pub const AGGREGATE: NoiseProfile = NoiseProfile {
        voltage_span: 8.0,
        frequency_span: 0.8,
        stability_span: 15.0,
    };
}

/// 趋势数据点
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub time: String,
    pub timestamp: DateTime<Utc>,
    pub voltage: f64,
    pub frequency: f64,
    pub stability: f64,
}

/// 趋势查询参数
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TrendQuery {
    pub region: Option<String>,
    pub range: Option<String>,
}

impl TrendQuery {
    pub fn range(&self) -> TrendRange {
        TrendRange::parse_lenient(self.range.as_deref())
    }

    /// 指定的区域（"All Regions" 视为未指定）
    pub fn region(&self) -> Option<&str> {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty() && *r != "All Regions")
    }
}
