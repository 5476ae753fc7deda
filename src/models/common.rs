//! 通用数据结构

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 统一 API 响应结构 `{success, data}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 带计数的列表响应 `{success, data, count}`
#[derive(Debug, Serialize)]
pub struct CountedResponse<T: Serialize> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> CountedResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// 统计响应 `{success, stats, period}`
#[derive(Debug, Serialize)]
pub struct StatsResponse<T: Serialize> {
    pub success: bool,
    pub stats: T,
    pub period: StatsPeriod,
}

impl<T: Serialize> StatsResponse<T> {
    pub fn new(stats: T, period: StatsPeriod) -> Self {
        Self {
            success: true,
            stats,
            period,
        }
    }
}

/// 分页信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64, total_items: i64) -> Self {
        let total_pages = (total_items as f64 / page_size as f64).ceil() as i64;
        Self {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: page_size,
        }
    }

    /// 溢出时取最大值，即一个空页
    pub fn offset(&self) -> i64 {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.items_per_page)
    }

    /// 截取当前页
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset().max(0)).unwrap_or(usize::MAX))
            .take(self.items_per_page.max(0) as usize)
            .collect()
    }
}

/// 分页响应 `{success, data, pagination}`
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

/// 统计时间窗口
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StatsPeriod {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[default]
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
}

impl StatsPeriod {
    /// 解析查询参数，未知值回退到 24h
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("1h") => StatsPeriod::OneHour,
            Some("6h") => StatsPeriod::SixHours,
            Some("7d") => StatsPeriod::SevenDays,
            _ => StatsPeriod::OneDay,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            StatsPeriod::OneHour => Duration::hours(1),
            StatsPeriod::SixHours => Duration::hours(6),
            StatsPeriod::OneDay => Duration::hours(24),
            StatsPeriod::SevenDays => Duration::days(7),
        }
    }

    /// 窗口起点（含）
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.duration()
    }
}

/// 统计查询参数
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StatsQuery {
    pub region: Option<String>,
    pub period: Option<String>,
}

impl StatsQuery {
    pub fn period(&self) -> StatsPeriod {
        StatsPeriod::parse_lenient(self.period.as_deref())
    }
}

/// 活跃记录查询参数
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActiveQuery {
    pub region: Option<String>,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub data_source: ServiceStatus,
    pub uptime_seconds: u64,
}

/// 服务状态
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub status: String,
    pub latency_ms: Option<u64>,
}

impl ServiceStatus {
    pub fn healthy(latency_ms: u64) -> Self {
        Self {
            status: "healthy".to_string(),
            latency_ms: Some(latency_ms),
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            latency_ms: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
