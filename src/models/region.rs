//! 区域电能数据模型（来自 CSV 平面文件）

use super::status::RegionStatus;
use serde::Serialize;

/// 区域电压默认值 (V)
pub const DEFAULT_VOLTAGE: f64 = 230.0;
/// 区域频率默认值 (Hz)
pub const DEFAULT_FREQUENCY: f64 = 50.0;
/// 稳定度默认值 (%)
pub const DEFAULT_STABILITY: i64 = 100;
/// 文本字段默认值
pub const UNKNOWN: &str = "Unknown";

/// 区域记录（CSV 一行）
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub region_name: String,
    pub live_frequency: f64,
    pub live_voltage: f64,
    pub power_quality_trend: String,
    pub active_outages: Vec<OutageInfo>,
    pub scheduled_outages: Vec<OutageInfo>,
    pub users_affected: i64,
    pub average_voltage: f64,
    pub average_frequency: f64,
    pub power_stability: i64,
}

impl Region {
    /// 三项实时读数分级
    pub fn status(&self) -> RegionStatus {
        RegionStatus::classify(
            self.live_voltage,
            self.live_frequency,
            self.power_stability as f64,
        )
    }
}

/// 停电条目（解析形式，嵌在区域记录中）
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutageInfo {
    pub location: String,
    pub start_time: String,
    pub duration: String,
    pub users_affected: i64,
    pub cause: String,
}

/// 解析告警：字段被默认值替换、行被跳过等
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    /// 文件行号（从 1 开始，含表头）
    pub line: usize,
    pub field: &'static str,
    pub raw: String,
    pub message: String,
}

/// 一次加载的结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionLoad {
    pub regions: Vec<Region>,
    pub warnings: Vec<ParseWarning>,
}

impl RegionLoad {
    /// 按名称查找区域（忽略大小写）
    pub fn find(&self, name: &str) -> Option<&Region> {
        self.regions
            .iter()
            .find(|r| r.region_name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn names(&self) -> Vec<String> {
        self.regions.iter().map(|r| r.region_name.clone()).collect()
    }
}

/// 加载报告（区分“无数据”与“数据源不可读”）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionReport {
    pub success: bool,
    pub source_available: bool,
    pub data: Vec<Region>,
    pub warnings: Vec<ParseWarning>,
}

/// 单区域详情：读数、分级、派生预警
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDetail {
    pub region: Region,
    pub status: RegionStatus,
    pub alerts: Vec<String>,
}

/// 停电看板条目（CSV 停电扁平化）
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionOutage {
    pub id: String,
    pub location: String,
    pub region: String,
    pub start_time: String,
    pub estimated_duration: String,
    pub affected_users: i64,
    pub status: &'static str,
    pub cause: String,
}

impl RegionOutage {
    pub fn from_info(region: &str, info: &OutageInfo, status: &'static str) -> Self {
        Self {
            id: format!("{}-{}-{}", region, info.location, status),
            location: info.location.clone(),
            region: region.to_string(),
            start_time: info.start_time.clone(),
            estimated_duration: info.duration.clone(),
            affected_users: info.users_affected,
            status,
            cause: info.cause.clone(),
        }
    }
}

/// 停电看板 `{active, scheduled}`
#[derive(Debug, Default, Serialize)]
pub struct OutageBoard {
    pub active: Vec<RegionOutage>,
    pub scheduled: Vec<RegionOutage>,
}

/// 区域概览（分析接口）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionOverview {
    pub name: String,
    pub avg_voltage: f64,
    pub avg_frequency: f64,
    pub stability: i64,
    pub active_outages: usize,
    pub scheduled_outages: usize,
    pub users_affected: i64,
    pub power_quality: &'static str,
    pub status: RegionStatus,
}

/// 区域概览汇总
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionOverviewSummary {
    pub total_regions: usize,
    pub avg_stability: i64,
    pub total_active_outages: usize,
    pub total_users_affected: i64,
}
