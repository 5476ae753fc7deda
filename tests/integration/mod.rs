//! HTTP 集成测试入口

#[path = "../helpers/mod.rs"]
#[macro_use]
mod helpers;

/// 以完整路由表初始化测试服务
macro_rules! test_app {
    ($services:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(spas::middleware::RequestLogger::new())
                .configure(|cfg| spas::routes::register_services(cfg, &$services))
                .configure(spas::routes::configure),
        )
        .await
    };
}

mod health_api_tests;
mod outage_api_tests;
mod power_api_tests;
mod region_api_tests;
