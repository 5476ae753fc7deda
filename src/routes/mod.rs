//! 路由配置模块

use crate::errors::AppError;
use crate::handlers;
use crate::services::AppServices;
use actix_web::{error, web};

/// 配置所有路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // 健康检查路由
        .service(
            web::scope("/health")
                .route("", web::get().to(handlers::health))
                .route("/ready", web::get().to(handlers::ready))
                .route("/live", web::get().to(handlers::live)),
        )
        // 区域数据（来自 CSV）
        .service(
            web::scope("/api/power-data")
                .route("", web::get().to(handlers::list_regions))
                .route("/report", web::get().to(handlers::region_report))
                .route("/regions/{name}", web::get().to(handlers::get_region))
                .route("/trends", web::get().to(handlers::get_trends))
                .route("/outages", web::get().to(handlers::get_outage_board)),
        )
        // 预警
        .service(
            web::scope("/api/alerts")
                .route("", web::get().to(handlers::list_alerts))
                .route("", web::post().to(handlers::create_alert))
                .route("/active", web::get().to(handlers::list_active_alerts))
                .route("/stats", web::get().to(handlers::alert_stats))
                .route("/{id}", web::put().to(handlers::update_alert))
                .route("/{id}/resolve", web::patch().to(handlers::resolve_alert)),
        )
        // 停电
        .service(
            web::scope("/api/outages")
                .route("", web::get().to(handlers::list_outages))
                .route("", web::post().to(handlers::create_outage))
                .route("/active", web::get().to(handlers::list_active_outages))
                .route("/stats", web::get().to(handlers::outage_stats))
                .route("/{id}", web::put().to(handlers::update_outage))
                .route("/{id}/resolve", web::patch().to(handlers::resolve_outage)),
        )
        // 设备读数
        .service(
            web::scope("/api/power")
                .route("/reading", web::post().to(handlers::submit_reading))
                .route("/current", web::get().to(handlers::current_readings))
                .route("/history", web::get().to(handlers::reading_history))
                .route(
                    "/location/{location}",
                    web::get().to(handlers::readings_by_location),
                )
                .route("/stats", web::get().to(handlers::reading_stats)),
        )
        // 分析
        .service(
            web::scope("/api/analytics")
                .route("/summary", web::get().to(handlers::quality_summary))
                .route("/trends", web::get().to(handlers::quality_trends))
                .route("/stability", web::get().to(handlers::stability_metrics))
                .route("/regions", web::get().to(handlers::region_overview)),
        );
}

/// 注入服务与请求解析配置
///
/// JSON 体和查询参数解析失败统一转为 `{"error": ...}` 的 400 响应。
pub fn register_services(cfg: &mut web::ServiceConfig, services: &AppServices) {
    cfg.app_data(web::Data::new(services.region.clone()))
        .app_data(web::Data::new(services.trend.clone()))
        .app_data(web::Data::new(services.alert.clone()))
        .app_data(web::Data::new(services.outage.clone()))
        .app_data(web::Data::new(services.power.clone()))
        .app_data(web::Data::new(services.analytics.clone()))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let message = match &err {
                error::JsonPayloadError::Deserialize(e) => e.to_string(),
                other => other.to_string(),
            };
            AppError::ValidationError(message).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            AppError::ValidationError(err.to_string()).into()
        }));
}
