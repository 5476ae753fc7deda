//! 分析 API 处理器

use crate::errors::AppError;
use crate::models::TrendQuery;
use crate::services::AnalyticsService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 电能质量汇总
pub async fn quality_summary(
    analytics_service: web::Data<Arc<AnalyticsService>>,
    query: web::Query<TrendQuery>,
) -> Result<HttpResponse, AppError> {
    let summary = analytics_service.summary(&query).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "summary": summary
    })))
}

/// 趋势序列与均值
pub async fn quality_trends(
    analytics_service: web::Data<Arc<AnalyticsService>>,
    query: web::Query<TrendQuery>,
) -> Result<HttpResponse, AppError> {
    let (points, stats) = analytics_service.trends(&query).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": points,
        "stats": stats,
        "filters": { "region": query.region() }
    })))
}

/// 稳定度分级
pub async fn stability_metrics(
    analytics_service: web::Data<Arc<AnalyticsService>>,
    query: web::Query<TrendQuery>,
) -> Result<HttpResponse, AppError> {
    let (metrics, period) = analytics_service.stability(&query).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": metrics,
        "period": period
    })))
}

/// 区域概览
pub async fn region_overview(
    analytics_service: web::Data<Arc<AnalyticsService>>,
) -> HttpResponse {
    let (regions, summary) = analytics_service.regions().await;

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": regions,
        "summary": summary
    }))
}
