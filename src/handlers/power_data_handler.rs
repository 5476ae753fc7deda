//! 区域电能数据 API 处理器
//!
//! `/api/power-data` 与 `/api/power-data/trends` 直接返回数组，保持与前端看板兼容。

use crate::errors::AppError;
use crate::models::{ApiResponse, TrendQuery};
use crate::services::{RegionService, TrendService};
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 全部区域
pub async fn list_regions(region_service: web::Data<Arc<RegionService>>) -> HttpResponse {
    HttpResponse::Ok().json(region_service.list().await)
}

/// 区域数据加载报告（含解析告警）
pub async fn region_report(region_service: web::Data<Arc<RegionService>>) -> HttpResponse {
    HttpResponse::Ok().json(region_service.report().await)
}

/// 单个区域详情
pub async fn get_region(
    region_service: web::Data<Arc<RegionService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();

    let detail = region_service.detail(&name).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail)))
}

/// 趋势序列
pub async fn get_trends(
    trend_service: web::Data<Arc<TrendService>>,
    query: web::Query<TrendQuery>,
) -> Result<HttpResponse, AppError> {
    let points = trend_service.trends(&query).await?;

    Ok(HttpResponse::Ok().json(points))
}

/// 停电看板
pub async fn get_outage_board(region_service: web::Data<Arc<RegionService>>) -> HttpResponse {
    HttpResponse::Ok().json(region_service.outage_board().await)
}
