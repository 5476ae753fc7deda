//! 区域数据服务
//!
//! 兼容接口（区域列表、停电看板）在数据源不可读时返回空结果并记录告警日志；
//! 报告接口和就绪检查会把“不可读”明确暴露出来。

use crate::errors::AppError;
use crate::models::{
    OutageBoard, Region, RegionDetail, RegionLoad, RegionOutage, RegionOverview,
    RegionOverviewSummary, RegionReport, THRESHOLDS,
};
use crate::repositories::RegionRepository;
use crate::services::alert_generator::derive_region_alerts;
use std::time::Instant;

/// 区域数据服务
pub struct RegionService {
    region_repo: RegionRepository,
}

impl RegionService {
    pub fn new(region_repo: RegionRepository) -> Self {
        Self { region_repo }
    }

    pub fn repository(&self) -> &RegionRepository {
        &self.region_repo
    }

    /// 读取全部区域；数据源不可读时按空数据处理
    pub async fn load_or_empty(&self) -> RegionLoad {
        match self.region_repo.load().await {
            Ok(load) => load,
            Err(e) => {
                tracing::warn!(error = %e, "区域数据源不可读，按空数据返回");
                RegionLoad::default()
            }
        }
    }

    /// 区域列表（兼容接口）
    pub async fn list(&self) -> Vec<Region> {
        self.load_or_empty().await.regions
    }

    /// 带解析告警的加载报告
    pub async fn report(&self) -> RegionReport {
        match self.region_repo.load().await {
            Ok(load) => RegionReport {
                success: true,
                source_available: true,
                data: load.regions,
                warnings: load.warnings,
            },
            Err(e) => {
                tracing::warn!(error = %e, "区域数据源不可读");
                RegionReport {
                    success: true,
                    source_available: false,
                    data: Vec::new(),
                    warnings: Vec::new(),
                }
            }
        }
    }

    /// 单个区域详情（名称忽略大小写）
    pub async fn detail(&self, name: &str) -> Result<RegionDetail, AppError> {
        let load = self.region_repo.load().await?;
        let region = load
            .find(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Region not found".to_string()))?;

        Ok(RegionDetail {
            status: region.status(),
            alerts: derive_region_alerts(&region),
            region,
        })
    }

    /// 停电看板：把各区域的停电条目扁平化
    pub async fn outage_board(&self) -> OutageBoard {
        let load = self.load_or_empty().await;
        let mut board = OutageBoard::default();

        for region in &load.regions {
            board.active.extend(
                region
                    .active_outages
                    .iter()
                    .map(|o| RegionOutage::from_info(&region.region_name, o, "active")),
            );
            board.scheduled.extend(
                region
                    .scheduled_outages
                    .iter()
                    .map(|o| RegionOutage::from_info(&region.region_name, o, "scheduled")),
            );
        }

        board
    }

    /// 区域概览与汇总
    pub async fn overview(&self) -> (Vec<RegionOverview>, RegionOverviewSummary) {
        let load = self.load_or_empty().await;

        let overviews: Vec<RegionOverview> = load
            .regions
            .iter()
            .map(|r| RegionOverview {
                name: r.region_name.clone(),
                avg_voltage: r.average_voltage,
                avg_frequency: r.average_frequency,
                stability: r.power_stability,
                active_outages: r.active_outages.len(),
                scheduled_outages: r.scheduled_outages.len(),
                users_affected: r.users_affected,
                power_quality: THRESHOLDS.classify_stability(r.power_stability as f64).label(),
                status: r.status(),
            })
            .collect();

        let total_regions = overviews.len();
        let avg_stability = if total_regions == 0 {
            0
        } else {
            let sum: f64 = overviews.iter().map(|o| o.stability as f64).sum();
            (sum / total_regions as f64).round() as i64
        };

        let summary = RegionOverviewSummary {
            total_regions,
            avg_stability,
            total_active_outages: overviews.iter().map(|o| o.active_outages).sum(),
            // CSV 中的用户数没有上限
            total_users_affected: overviews
                .iter()
                .fold(0i64, |acc, o| acc.saturating_add(o.users_affected)),
        };

        (overviews, summary)
    }

    /// 检查数据源是否可读，返回耗时（毫秒）
    pub async fn check_source(&self) -> Result<u64, AppError> {
        let start = Instant::now();
        self.region_repo.read_source().await?;
        Ok(start.elapsed().as_millis() as u64)
    }
}
