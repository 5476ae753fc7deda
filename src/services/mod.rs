//! 业务逻辑层（Service）

pub mod alert_generator;
mod alert_service;
mod analytics_service;
mod outage_service;
mod power_service;
mod region_service;
mod trend_service;

pub use alert_service::AlertService;
pub use analytics_service::AnalyticsService;
pub use outage_service::OutageService;
pub use power_service::PowerService;
pub use region_service::RegionService;
pub use trend_service::{select_baseline, TrendService, TrendSynthesizer};

use crate::config::Settings;
use crate::errors::AppError;
use crate::repositories::{
    InMemoryAlertRepository, InMemoryOutageRepository, InMemoryReadingRepository,
    RegionRepository,
};
use std::sync::Arc;

/// 应用级服务集合
#[derive(Clone)]
pub struct AppServices {
    pub region: Arc<RegionService>,
    pub trend: Arc<TrendService>,
    pub alert: Arc<AlertService>,
    pub outage: Arc<OutageService>,
    pub power: Arc<PowerService>,
    pub analytics: Arc<AnalyticsService>,
}

impl AppServices {
    /// 按配置组装所有服务（存储均为进程内实现）
    pub fn from_settings(settings: &Settings) -> Self {
        let region = Arc::new(RegionService::new(RegionRepository::from_settings(
            &settings.data,
        )));
        let trend = Arc::new(TrendService::new(region.clone(), settings.trends.seed));
        let analytics = Arc::new(AnalyticsService::new(region.clone(), trend.clone()));

        Self {
            alert: Arc::new(AlertService::new(Arc::new(InMemoryAlertRepository::new()))),
            outage: Arc::new(OutageService::new(Arc::new(InMemoryOutageRepository::new()))),
            power: Arc::new(PowerService::new(Arc::new(InMemoryReadingRepository::new()))),
            region,
            trend,
            analytics,
        }
    }

    /// 写入演示数据
    pub async fn seed_demo_data(&self) -> Result<(), AppError> {
        self.alert.seed_demo_data().await?;
        self.outage.seed_demo_data().await?;
        self.power.seed_demo_data().await?;
        tracing::info!("演示数据已写入内存存储");
        Ok(())
    }
}
