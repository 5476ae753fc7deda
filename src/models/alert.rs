//! 预警模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// 预警级别（critical > high > medium > low）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
            AlertSeverity::Critical => "critical",
        }
    }
}

/// 预警类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Undervoltage,
    Overvoltage,
    FrequencyInstability,
    Outage,
    Maintenance,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Undervoltage => "undervoltage",
            AlertType::Overvoltage => "overvoltage",
            AlertType::FrequencyInstability => "frequency_instability",
            AlertType::Outage => "outage",
            AlertType::Maintenance => "maintenance",
        }
    }
}

/// 预警记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub location: String,
    pub region: String,
    pub message: String,
    pub affected_users: i64,
    pub timestamp: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

/// 创建预警请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    #[serde(rename = "type")]
    #[validate(required(message = "is required"))]
    pub alert_type: Option<AlertType>,

    #[validate(required(message = "is required"))]
    pub severity: Option<AlertSeverity>,

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

    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub message: Option<String>,

    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub affected_users: Option<i64>,
}

impl CreateAlertRequest {
    /// 校验顺序（报告第一个失败字段）
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("alert_type", "type"),
        ("severity", "severity"),
        ("location", "location"),
        ("region", "region"),
        ("message", "message"),
        ("affected_users", "affectedUsers"),
    ];
}

/// 更新预警请求（部分更新）
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlertRequest {
    pub resolved_at: Option<DateTime<Utc>>,

    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub message: Option<String>,

    pub severity: Option<AlertSeverity>,
}

impl UpdateAlertRequest {
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("resolved_at", "resolvedAt"),
        ("message", "message"),
        ("severity", "severity"),
    ];
}

/// 预警状态过滤
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatusFilter {
    #[default]
    All,
    Active,
    Resolved,
}

/// 预警列表查询参数
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AlertListQuery {
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub severity: Option<AlertSeverity>,
    pub region: Option<String>,
    #[serde(default)]
    pub status: AlertStatusFilter,

    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[validate(range(min = 1, message = "must be greater than 0"))]
    #[serde(default = "default_page")]
    pub page: i64,
}

impl AlertListQuery {
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[("limit", "limit"), ("page", "page")];
}

impl Default for AlertListQuery {
    fn default() -> Self {
        Self {
            alert_type: None,
            severity: None,
            region: None,
            status: AlertStatusFilter::All,
            limit: default_limit(),
            page: default_page(),
        }
    }
}

pub(crate) fn default_limit() -> i64 { 50 }
pub(crate) fn default_page() -> i64 { 1 }

/// 预警统计
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    pub total: usize,
    pub active: usize,
    pub resolved: usize,
    pub by_type: BTreeMap<&'static str, usize>,
    pub by_severity: BTreeMap<&'static str, usize>,
    pub total_affected_users: i64,
}
