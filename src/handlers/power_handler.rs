//! 设备读数 API 处理器

use crate::errors::AppError;
use crate::models::{
    CreateReadingRequest, LocationQuery, ReadingFilter, ReadingHistoryQuery, ReadingStatsQuery,
    StatsResponse,
};
use crate::services::PowerService;
use crate::utils::format_iso8601;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use std::sync::Arc;

/// 上报读数
pub async fn submit_reading(
    power_service: web::Data<Arc<PowerService>>,
    body: web::Json<CreateReadingRequest>,
) -> Result<HttpResponse, AppError> {
    let (reading, alerts) = power_service.submit(body.into_inner()).await?;

    // 无预警时返回 null
    let alerts = (!alerts.is_empty()).then_some(alerts);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "message": "Power reading recorded successfully",
        "reading": reading,
        "alerts": alerts
    })))
}

/// 各位置最新读数
pub async fn current_readings(
    power_service: web::Data<Arc<PowerService>>,
    query: web::Query<ReadingFilter>,
) -> Result<HttpResponse, AppError> {
    let readings = power_service.current(&query).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": readings.len(),
        "data": readings,
        "timestamp": format_iso8601(&Utc::now())
    })))
}

/// 历史读数
pub async fn reading_history(
    power_service: web::Data<Arc<PowerService>>,
    query: web::Query<ReadingHistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let (readings, total) = power_service.history(&query).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": readings.len(),
        "total": total,
        "data": readings
    })))
}

/// 按位置查询读数
pub async fn readings_by_location(
    power_service: web::Data<Arc<PowerService>>,
    path: web::Path<String>,
    query: web::Query<LocationQuery>,
) -> Result<HttpResponse, AppError> {
    let location = path.into_inner();

    let readings = power_service.by_location(&location, &query).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "location": location,
        "count": readings.len(),
        "data": readings
    })))
}

/// 读数统计
pub async fn reading_stats(
    power_service: web::Data<Arc<PowerService>>,
    query: web::Query<ReadingStatsQuery>,
) -> Result<HttpResponse, AppError> {
    let (stats, period) = power_service.stats(&query).await?;

    Ok(HttpResponse::Ok().json(StatsResponse::new(stats, period)))
}
