//! 设备读数模型（IoT 上报）

use super::alert::{AlertSeverity, AlertType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 电能读数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PowerReading {
    pub id: String,
    pub device_id: String,
    pub location: String,
    pub region: String,
    pub voltage: f64,
    pub frequency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// 上报读数请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingRequest {
    #[validate(
        required(message = "is required"),
        range(min = 180.0, max = 260.0, message = "must be between 180 and 260")
    )]
    pub voltage: Option<f64>,

    #[validate(
        required(message = "is required"),
        range(min = 48.0, max = 52.0, message = "must be between 48 and 52")
    )]
    pub frequency: Option<f64>,

    #[validate(range(min = 0.000001, message = "must be a positive number"))]
    pub current: Option<f64>,

    #[validate(range(min = 0.000001, message = "must be a positive number"))]
    pub power: Option<f64>,

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
    pub device_id: Option<String>,
}

impl CreateReadingRequest {
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("voltage", "voltage"),
        ("frequency", "frequency"),
        ("current", "current"),
        ("power", "power"),
        ("location", "location"),
        ("region", "region"),
        ("device_id", "deviceId"),
    ];
}

/// 读数触发的即时预警（不入库）
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingAlert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub location: String,
    pub region: String,
    pub timestamp: DateTime<Utc>,
}

/// 当前读数查询参数
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReadingFilter {
    pub location: Option<String>,
    pub region: Option<String>,
}

/// 历史读数查询参数
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReadingHistoryQuery {
    pub location: Option<String>,
    pub region: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    #[validate(range(min = 1, max = 1000, message = "must be between 1 and 1000"))]
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

impl ReadingHistoryQuery {
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[("limit", "limit")];
}

impl Default for ReadingHistoryQuery {
    fn default() -> Self {
        Self {
            location: None,
            region: None,
            start_date: None,
            end_date: None,
            limit: default_history_limit(),
        }
    }
}

fn default_history_limit() -> usize { 100 }

/// 按位置查询参数
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationQuery {
    #[validate(range(min = 1, max = 1000, message = "must be between 1 and 1000"))]
    #[serde(default = "default_location_limit")]
    pub limit: usize,
}

impl LocationQuery {
    pub const FIELDS: &'static [(&'static str, &'static str)] = &[("limit", "limit")];
}

fn default_location_limit() -> usize { 50 }

/// 读数统计查询参数
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReadingStatsQuery {
    pub location: Option<String>,
    pub region: Option<String>,
    pub period: Option<String>,
}

/// 读数统计
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStats {
    pub avg_voltage: f64,
    pub avg_frequency: f64,
    pub min_voltage: f64,
    pub max_voltage: f64,
    pub min_frequency: f64,
    pub max_frequency: f64,
    pub total_readings: usize,
}
