//! 停电 API 处理器

use crate::errors::AppError;
use crate::models::{
    ActiveQuery, CountedResponse, CreateOutageRequest, OutageListQuery, StatsQuery,
    StatsResponse, UpdateOutageRequest,
};
use crate::services::OutageService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 查询停电列表
pub async fn list_outages(
    outage_service: web::Data<Arc<OutageService>>,
    query: web::Query<OutageListQuery>,
) -> Result<HttpResponse, AppError> {
    let response = outage_service.list(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 进行中的停电
pub async fn list_active_outages(
    outage_service: web::Data<Arc<OutageService>>,
    query: web::Query<ActiveQuery>,
) -> Result<HttpResponse, AppError> {
    let outages = outage_service.active(query.region.as_deref()).await?;

    Ok(HttpResponse::Ok().json(CountedResponse::new(outages)))
}

/// 登记停电
pub async fn create_outage(
    outage_service: web::Data<Arc<OutageService>>,
    body: web::Json<CreateOutageRequest>,
) -> Result<HttpResponse, AppError> {
    let outage = outage_service.create(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "message": "Outage created successfully",
        "outage": outage
    })))
}

/// 部分更新停电
pub async fn update_outage(
    outage_service: web::Data<Arc<OutageService>>,
    path: web::Path<String>,
    body: web::Json<UpdateOutageRequest>,
) -> Result<HttpResponse, AppError> {
    let outage_id = path.into_inner();

    let outage = outage_service.update(&outage_id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Outage updated successfully",
        "outage": outage
    })))
}

/// 解决停电
pub async fn resolve_outage(
    outage_service: web::Data<Arc<OutageService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let outage_id = path.into_inner();

    let outage = outage_service.resolve(&outage_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Outage resolved successfully",
        "outage": outage
    })))
}

/// 停电统计
pub async fn outage_stats(
    outage_service: web::Data<Arc<OutageService>>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let stats = outage_service.stats(&query).await?;

    Ok(HttpResponse::Ok().json(StatsResponse::new(stats, query.period())))
}
