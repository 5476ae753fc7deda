//! 预警 API 处理器

use crate::errors::AppError;
use crate::models::{
    ActiveQuery, AlertListQuery, CountedResponse, CreateAlertRequest, StatsQuery, StatsResponse,
    UpdateAlertRequest,
};
use crate::services::AlertService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 查询预警列表
pub async fn list_alerts(
    alert_service: web::Data<Arc<AlertService>>,
    query: web::Query<AlertListQuery>,
) -> Result<HttpResponse, AppError> {
    let response = alert_service.list(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 未解决的预警
pub async fn list_active_alerts(
    alert_service: web::Data<Arc<AlertService>>,
    query: web::Query<ActiveQuery>,
) -> Result<HttpResponse, AppError> {
    let alerts = alert_service.active(query.region.as_deref()).await?;

    Ok(HttpResponse::Ok().json(CountedResponse::new(alerts)))
}

/// 创建预警
pub async fn create_alert(
    alert_service: web::Data<Arc<AlertService>>,
    body: web::Json<CreateAlertRequest>,
) -> Result<HttpResponse, AppError> {
    let alert = alert_service.create(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "message": "Alert created successfully",
        "alert": alert
    })))
}

/// 部分更新预警
pub async fn update_alert(
    alert_service: web::Data<Arc<AlertService>>,
    path: web::Path<String>,
    body: web::Json<UpdateAlertRequest>,
) -> Result<HttpResponse, AppError> {
    let alert_id = path.into_inner();

    let alert = alert_service.update(&alert_id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Alert updated successfully",
        "alert": alert
    })))
}

/// 解决预警
pub async fn resolve_alert(
    alert_service: web::Data<Arc<AlertService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let alert_id = path.into_inner();

    let alert = alert_service.resolve(&alert_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Alert resolved successfully",
        "alert": alert
    })))
}

/// 预警统计
pub async fn alert_stats(
    alert_service: web::Data<Arc<AlertService>>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let stats = alert_service.stats(&query).await?;

    Ok(HttpResponse::Ok().json(StatsResponse::new(stats, query.period())))
}
