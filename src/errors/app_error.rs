//! 统一错误类型定义

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// 应用错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 资源不存在 (404)
    #[error("资源不存在: {0}")]
    NotFound(String),

    // 请求验证错误 (400)
    #[error("请求参数无效: {0}")]
    ValidationError(String),

    // 重复解决等状态冲突 (400)
    #[error("状态冲突: {0}")]
    AlreadyResolved(String),

    // 数据源不可读 (503)
    #[error("数据源不可用: {0}")]
    SourceUnavailable(String),

    // 内部错误 (500)
    #[error("内部服务错误: {0}")]
    InternalError(String),

    // 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// API 错误响应结构
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyResolved(_) => StatusCode::BAD_REQUEST,
            AppError::SourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // 客户端错误原样返回，内部错误隐藏细节
        let message = match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::AlreadyResolved(msg) => msg.clone(),
            AppError::SourceUnavailable(_) => "Power data source unavailable".to_string(),
            AppError::InternalError(_) => "Internal server error".to_string(),
            AppError::ConfigError(_) => "Server configuration error".to_string(),
        };

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                status = %status,
                "请求处理错误"
            );
        } else {
            tracing::debug!(
                error = %self,
                status = %status,
                "请求被拒绝"
            );
        }

        HttpResponse::build(status).json(ErrorResponse { error: message })
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
