//! 时间处理工具

use chrono::{DateTime, Duration, Utc};

/// 获取 N 小时前的时间
pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    Utc::now() - Duration::hours(hours)
}

/// 获取 N 分钟前的时间
pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - Duration::minutes(minutes)
}

/// 格式化为 ISO 8601
pub fn format_iso8601(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// 小时桶标签，如 `09:00`
pub fn hour_label(dt: &DateTime<Utc>) -> String {
    dt.format("%H:%M").to_string()
}

/// 日桶标签，如 `Mar 7`
pub fn day_label(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d").to_string()
}
