//! 数据验证工具

use crate::errors::AppError;
use chrono::{DateTime, Utc};
use validator::Validate;

/// 校验请求，只报告第一个失败字段
///
/// `fields` 为 `(结构体字段名, 对外字段名)`，按声明顺序排列。
pub fn validate_request<T: Validate>(
    request: &T,
    fields: &[(&str, &str)],
) -> Result<(), AppError> {
    let errors = match request.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let field_errors = errors.field_errors();

    let first = fields
        .iter()
        .find_map(|(rust_name, wire_name)| {
            field_errors
                .get(*rust_name)
                .or_else(|| field_errors.get(*wire_name))
                .map(|errs| (*wire_name, *errs))
        })
        .or_else(|| {
            field_errors
                .iter()
                .min_by_key(|(name, _)| **name)
                .map(|(name, errs)| (*name, *errs))
        });

    let message = match first {
        Some((name, errs)) => {
            let detail = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "is invalid".to_string());
            format!("\"{}\" {}", name, detail)
        }
        None => "Invalid request".to_string(),
    };

    Err(AppError::ValidationError(message))
}

/// 验证时间区间（结束不早于开始）
pub fn validate_time_order(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    end_field: &str,
) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::ValidationError(format!(
            "\"{}\" must not be earlier than the start time",
            end_field
        )));
    }
    Ok(())
}
