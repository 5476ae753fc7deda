//! SPAS - 智能电力预警系统
//!
//! 加纳电网电能质量监控与预警服务

use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spas::{
    config::{LoggingSettings, Settings},
    middleware::RequestLogger,
    routes,
    services::AppServices,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let settings = Settings::load().context("配置加载失败")?;

    // 初始化日志
    init_tracing(&settings.logging);

    info!("⚡ SPAS 服务启动中...");
    info!(csv_path = %settings.data.csv_path, "✅ 配置加载完成");

    // 初始化服务（存储均在进程内）
    let services = AppServices::from_settings(&settings);

    match services.region.check_source().await {
        Ok(elapsed_ms) => info!(elapsed_ms, "✅ 区域数据源可读"),
        Err(e) => tracing::warn!(error = %e, "⚠️ 区域数据源不可读，相关接口将返回空数据"),
    }

    if settings.store.seed_demo_data {
        services.seed_demo_data().await.context("演示数据写入失败")?;
    }

    let server_addr = settings.server_addr();
    let workers = settings.workers();

    info!("🚀 服务启动在 http://{}", server_addr);
    info!("📊 工作线程数: {}", workers);

    // 启动 HTTP 服务器
    HttpServer::new(move || {
        // 配置 CORS
        let cors = Cors::default()
            .allowed_origin_fn(|origin, _req_head| {
                origin.as_bytes().starts_with(b"http://localhost")
                    || origin.as_bytes().starts_with(b"http://127.0.0.1")
                    || origin.as_bytes().starts_with(b"https://")
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH"])
            .allowed_headers(vec!["Content-Type", "X-Request-ID"])
            .expose_headers(vec!["X-Request-ID"])
            .max_age(3600);

        App::new()
            // 全局中间件
            .wrap(cors)
            .wrap(RequestLogger::new())
            .wrap(middleware::Compress::default())
            // 注入服务
            .configure(|cfg| routes::register_services(cfg, &services))
            // 配置 HTTP 路由
            .configure(routes::configure)
    })
    .workers(workers)
    .bind(&server_addr)
    .with_context(|| format!("无法绑定地址 {}", server_addr))?
    .run()
    .await?;

    Ok(())
}

/// 初始化日志系统
///
/// `RUST_LOG` 优先；否则使用配置中的级别。
fn init_tracing(logging: &LoggingSettings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("{},spas=debug", logging.level))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
