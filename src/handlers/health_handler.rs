//! 健康检查 API 处理器

use crate::models::{HealthCheckResponse, ServiceStatus};
use crate::services::RegionService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use std::time::Instant;

/// 应用启动时间
static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

/// 健康检查（含数据源状态）
pub async fn health(region_service: web::Data<Arc<RegionService>>) -> HttpResponse {
    let data_source = match region_service.check_source().await {
        Ok(latency) => ServiceStatus::healthy(latency),
        Err(_) => ServiceStatus::unhealthy(),
    };

    let response = HealthCheckResponse {
        status: if data_source.is_healthy() {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_source,
        uptime_seconds: START_TIME.elapsed().as_secs(),
    };

    HttpResponse::Ok().json(response)
}

/// 就绪检查：区域数据文件可读
pub async fn ready(region_service: web::Data<Arc<RegionService>>) -> HttpResponse {
    match region_service.check_source().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "ready": true
        })),
        Err(e) => {
            tracing::warn!(error = %e, "就绪检查失败");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "ready": false,
                "dataSource": false
            }))
        }
    }
}

/// 存活检查
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "alive": true
    }))
}
