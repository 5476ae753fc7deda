//! 区域数据仓库（CSV 平面文件）
//!
//! 文件格式：首行为表头（不校验），之后每行至少 10 个逗号分隔字段：
//! 区域名、实时频率、实时电压、趋势标签、活跃停电、计划停电、
//! 受影响用户数、平均电压、平均频率、稳定度（可带 `%`）。
//!
//! 停电字段内部用 `" || "` 分隔条目，条目内用 `" | "` 分隔
//! 位置、开始时间、持续时长、用户数、原因五个子字段。
//!
//! 解析是宽松的：坏字段替换为默认值、短行跳过，都不会让整次加载失败，
//! 但每一次替换都会记录为 [`ParseWarning`]。

use crate::config::DataSettings;
use crate::errors::AppError;
use crate::models::{
    OutageInfo, ParseWarning, Region, RegionLoad, DEFAULT_FREQUENCY, DEFAULT_STABILITY,
    DEFAULT_VOLTAGE, UNKNOWN,
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// 每行最少字段数
pub const MIN_FIELDS: usize = 10;
/// 停电条目分隔符
pub const OUTAGE_ENTRY_SEPARATOR: &str = " || ";
/// 停电子字段分隔符
pub const OUTAGE_FIELD_SEPARATOR: &str = " | ";
/// 停电条目子字段数
pub const OUTAGE_FIELDS: usize = 5;

/// 区域数据仓库
#[derive(Debug, Clone)]
pub struct RegionRepository {
    path: PathBuf,
    read_timeout: Duration,
}

impl RegionRepository {
    pub fn new(path: impl Into<PathBuf>, read_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            read_timeout,
        }
    }

    pub fn from_settings(settings: &DataSettings) -> Self {
        Self::new(
            &settings.csv_path,
            Duration::from_millis(settings.read_timeout_ms),
        )
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// 读取原始文件内容（带超时）
    pub async fn read_source(&self) -> Result<String, AppError> {
        let read = tokio::fs::read_to_string(&self.path);

        match tokio::time::timeout(self.read_timeout, read).await {
            Ok(Ok(content)) => Ok(content),
            Ok(Err(e)) => Err(AppError::SourceUnavailable(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
            Err(_) => Err(AppError::SourceUnavailable(format!(
                "{}: 读取超时 ({} ms)",
                self.path.display(),
                self.read_timeout.as_millis()
            ))),
        }
    }

    /// 读取并解析全部区域（每次调用都重新读取，不缓存）
    pub async fn load(&self) -> Result<RegionLoad, AppError> {
        let content = self.read_source().await?;
        let load = parse_regions(&content, Utc::now());

        if !load.warnings.is_empty() {
            tracing::warn!(
                path = %self.path.display(),
                regions = load.regions.len(),
                warnings = load.warnings.len(),
                "区域数据存在默认值替换或跳过的行"
            );
        }

        tracing::debug!(
            path = %self.path.display(),
            regions = load.regions.len(),
            "区域数据加载完成"
        );

        Ok(load)
    }
}

/// 解析整个 CSV 内容
///
/// `now` 用作残缺停电条目的开始时间。
pub fn parse_regions(content: &str, now: DateTime<Utc>) -> RegionLoad {
    let mut load = RegionLoad::default();

    // 首行是表头
    for (index, raw_line) in content.trim().split('\n').enumerate().skip(1) {
        let line_no = index + 1;
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let values: Vec<&str> = line.split(',').collect();

        if values.len() < MIN_FIELDS {
            load.warnings.push(ParseWarning {
                line: line_no,
                field: "row",
                raw: line.to_string(),
                message: format!(
                    "expected at least {} fields, found {}; row skipped",
                    MIN_FIELDS,
                    values.len()
                ),
            });
            continue;
        }

        let mut row = RowParser {
            line: line_no,
            now,
            warnings: &mut load.warnings,
        };

        let region = Region {
            region_name: values[0].trim().to_string(),
            live_frequency: row.float("liveFrequency", values[1], DEFAULT_FREQUENCY),
            live_voltage: row.float("liveVoltage", values[2], DEFAULT_VOLTAGE),
            power_quality_trend: row.text("powerQualityTrend", values[3], UNKNOWN),
            active_outages: row.outages("activeOutages", values[4]),
            scheduled_outages: row.outages("scheduledOutages", values[5]),
            users_affected: row.int("usersAffected", values[6], 0),
            average_voltage: row.float("averageVoltage", values[7], DEFAULT_VOLTAGE),
            average_frequency: row.float("averageFrequency", values[8], DEFAULT_FREQUENCY),
            power_stability: row.int(
                "powerStability",
                &values[9].replacen('%', "", 1),
                DEFAULT_STABILITY,
            ),
        };

        load.regions.push(region);
    }

    load
}

/// 解析停电字段（不收集告警）
pub fn parse_outages(raw: &str, now: DateTime<Utc>) -> Vec<OutageInfo> {
    let mut warnings = Vec::new();
    parse_outages_with_warnings(raw, now, 0, "outages", &mut warnings)
}

/// 解析停电字段
///
/// 子字段不足 5 个的条目替换为固定占位记录，不会被丢弃。
pub fn parse_outages_with_warnings(
    raw: &str,
    now: DateTime<Utc>,
    line: usize,
    field: &'static str,
    warnings: &mut Vec<ParseWarning>,
) -> Vec<OutageInfo> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(OUTAGE_ENTRY_SEPARATOR)
        .map(|entry| {
            let parts: Vec<&str> = entry.split(OUTAGE_FIELD_SEPARATOR).collect();

            if parts.len() < OUTAGE_FIELDS {
                warnings.push(ParseWarning {
                    line,
                    field,
                    raw: entry.to_string(),
                    message: format!(
                        "expected {} sub-fields, found {}; placeholder used",
                        OUTAGE_FIELDS,
                        parts.len()
                    ),
                });
                return placeholder_outage(now);
            }

            let users_raw = parts[3].trim();
            let users_affected = match parse_int_lenient(users_raw) {
                Some(n) => n,
                None => {
                    warnings.push(ParseWarning {
                        line,
                        field,
                        raw: users_raw.to_string(),
                        message: "unparsable user count; defaulted to 0".to_string(),
                    });
                    0
                }
            };

            OutageInfo {
                location: parts[0].trim().to_string(),
                start_time: parts[1].trim().to_string(),
                duration: parts[2].trim().to_string(),
                users_affected,
                cause: parts[4].trim().to_string(),
            }
        })
        .collect()
}

/// 残缺停电条目的占位记录
pub fn placeholder_outage(now: DateTime<Utc>) -> OutageInfo {
    OutageInfo {
        location: UNKNOWN.to_string(),
        start_time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        duration: "0h".to_string(),
        users_affected: 0,
        cause: UNKNOWN.to_string(),
    }
}

/// 单行解析上下文
struct RowParser<'a> {
    line: usize,
    now: DateTime<Utc>,
    warnings: &'a mut Vec<ParseWarning>,
}

impl RowParser<'_> {
    /// 浮点字段；无法解析或为 0 时取默认值
    fn float(&mut self, field: &'static str, raw: &str, default: f64) -> f64 {
        match parse_float_lenient(raw) {
            Some(v) if v != 0.0 => v,
            _ => {
                self.warn_default(field, raw, default);
                default
            }
        }
    }

    /// 整数字段；无法解析或为 0 时取默认值
    fn int(&mut self, field: &'static str, raw: &str, default: i64) -> i64 {
        match parse_int_lenient(raw) {
            Some(v) if v != 0 => v,
            Some(_) if default == 0 => 0,
            _ => {
                self.warn_default(field, raw, default);
                default
            }
        }
    }

    fn text(&mut self, field: &'static str, raw: &str, default: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.warn_default(field, raw, default);
            default.to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn outages(&mut self, field: &'static str, raw: &str) -> Vec<OutageInfo> {
        parse_outages_with_warnings(raw, self.now, self.line, field, self.warnings)
    }

    fn warn_default(&mut self, field: &'static str, raw: &str, default: impl std::fmt::Display) {
        self.warnings.push(ParseWarning {
            line: self.line,
            field,
            raw: raw.to_string(),
            message: format!("unparsable or empty value; defaulted to {}", default),
        });
    }
}

/// 取数值前缀的字节长度：可选符号、数字、可选小数部分、可选指数
fn numeric_prefix_len(s: &str, allow_fraction: bool) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if allow_fraction && i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if allow_fraction && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

/// 宽松浮点解析：接受数值前缀（`"230V"` → 230）
pub fn parse_float_lenient(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let len = numeric_prefix_len(s, true);
    if len == 0 {
        return None;
    }
    s[..len].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 宽松整数解析：接受整数前缀（`"85.5"` → 85）
pub fn parse_int_lenient(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let len = numeric_prefix_len(s, false);
    if len == 0 {
        return None;
    }
    s[..len].parse::<i64>().ok()
}
