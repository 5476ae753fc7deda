//! 停电记录模型（可变存储形式）

use super::alert::{default_limit, default_page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 停电状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OutageStatus {
    Active,
    Scheduled,
    Resolved,
}

impl OutageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutageStatus::Active => "active",
            OutageStatus::Scheduled => "scheduled",
            OutageStatus::Resolved => "resolved",
        }
    }
}

/// 停电记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outage {
    pub id: String,
    pub location: String,
    pub region: String,
    pub start_time: DateTime<Utc>,
    pub estimated_end_time: DateTime<Utc>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub cause: String,
    pub status: OutageStatus,
    pub affected_users: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Outage {
    pub fn is_resolved(&self) -> bool {
        self.status == OutageStatus::Resolved
    }

    /// 实际持续时长（仅已结束的停电）
    pub fn actual_duration_minutes(&self) -> Option<i64> {
        self.actual_end_time
            .map(|end| (end - self.start_time).num_minutes())
    }
}

/// 创建停电请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutageRequest {
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub location: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub region: Option<String>,

    #[validate(required(message = "is required"))]
    pub start_time: Option<DateTime<Utc>>,

    #[validate(required(message = "is required"))]
    pub estimated_end_time: Option<DateTime<Utc>>,

    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub cause: Option<String>,

    #[validate(required(message = "is required"))]
    pub status: Option<OutageStatus>,

    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub affected_users: Option<i64>,

    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub description: Option<String>,
}

impl CreateOutageRequest {
    /// 校验顺序（报告第一个失败字段）
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("location", "location"),
        ("region", "region"),
        ("start_time", "startTime"),
        ("estimated_end_time", "estimatedEndTime"),
        ("cause", "cause"),
        ("status", "status"),
        ("affected_users", "affectedUsers"),
        ("description", "description"),
    ];
}

/// 更新停电请求（部分更新）
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutageRequest {
    pub actual_end_time: Option<DateTime<Utc>>,
    pub status: Option<OutageStatus>,
    pub estimated_end_time: Option<DateTime<Utc>>,

    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub cause: Option<String>,

    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub description: Option<String>,
}

impl UpdateOutageRequest {
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("actual_end_time", "actualEndTime"),
        ("status", "status"),
        ("estimated_end_time", "estimatedEndTime"),
        ("cause", "cause"),
        ("description", "description"),
    ];
}

/// 停电列表查询参数
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OutageListQuery {
    pub status: Option<OutageStatus>,
    pub region: Option<String>,
    pub location: Option<String>,

    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[validate(range(min = 1, message = "must be greater than 0"))]
    #[serde(default = "default_page")]
    pub page: i64,
}

impl OutageListQuery {
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[("limit", "limit"), ("page", "page")];
}

impl Default for OutageListQuery {
    fn default() -> Self {
        Self {
            status: None,
            region: None,
            location: None,
            limit: default_limit(),
            page: default_page(),
        }
    }
}

/// 停电统计
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutageStats {
    pub total: usize,
    pub active: usize,
    pub resolved: usize,
    pub scheduled: usize,
    pub avg_duration_minutes: i64,
    pub total_affected_users: i64,
}
