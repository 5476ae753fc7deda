//! 电能质量分析服务

use crate::errors::AppError;
use crate::models::{
    FrequencyStatus, FrequencySummary, QualitySummary, RegionOverview, RegionOverviewSummary,
    StabilityMetrics, StabilityStatus, StabilitySummary, TrendPoint, TrendQuery, TrendRange,
    TrendStats, VoltageStatus, VoltageSummary, THRESHOLDS,
};
use crate::services::{RegionService, TrendService};
use std::sync::Arc;

/// 分析服务
pub struct AnalyticsService {
    region_service: Arc<RegionService>,
    trend_service: Arc<TrendService>,
}

impl AnalyticsService {
    pub fn new(region_service: Arc<RegionService>, trend_service: Arc<TrendService>) -> Self {
        Self {
            region_service,
            trend_service,
        }
    }

    /// 对趋势序列逐点分级并汇总
    pub async fn summary(&self, query: &TrendQuery) -> Result<QualitySummary, AppError> {
        let range = query.range();
        let region = query.region();

        let points = self.trend_service.series(region, range).await?;

        Ok(summarize(&points, range, region.map(str::to_string)))
    }

    /// 趋势序列及其均值
    pub async fn trends(
        &self,
        query: &TrendQuery,
    ) -> Result<(Vec<TrendPoint>, TrendStats), AppError> {
        let range = query.range();
        let region = query.region();

        let points = self.trend_service.series(region, range).await?;
        let stats = TrendStats::from(&summarize(&points, range, None));

        Ok((points, stats))
    }

    /// 稳定度分级
    pub async fn stability(
        &self,
        query: &TrendQuery,
    ) -> Result<(StabilityMetrics, TrendRange), AppError> {
        let range = query.range();
        let points = self.trend_service.series(query.region(), range).await?;

        Ok((StabilityMetrics::from(&summarize(&points, range, None)), range))
    }

    /// 各区域概览
    pub async fn regions(&self) -> (Vec<RegionOverview>, RegionOverviewSummary) {
        self.region_service.overview().await
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// 按统一阈值表统计各等级数量
pub fn summarize(
    points: &[TrendPoint],
    range: TrendRange,
    region: Option<String>,
) -> QualitySummary {
    let mut voltage = VoltageSummary::default();
    let mut frequency = FrequencySummary::default();
    let mut stability = StabilitySummary::default();

    for p in points {
        match THRESHOLDS.classify_voltage(p.voltage) {
            VoltageStatus::Normal => voltage.normal += 1,
            VoltageStatus::Low => voltage.low += 1,
            VoltageStatus::High => voltage.high += 1,
            VoltageStatus::Dangerous(_) => voltage.dangerous += 1,
        }
        match THRESHOLDS.classify_frequency(p.frequency) {
            FrequencyStatus::Stable => frequency.stable += 1,
            FrequencyStatus::Unstable => frequency.unstable += 1,
        }
        match THRESHOLDS.classify_stability(p.stability) {
            StabilityStatus::Excellent => stability.excellent += 1,
            StabilityStatus::Good => stability.good += 1,
            StabilityStatus::Poor => stability.poor += 1,
        }
    }

    if !points.is_empty() {
        let n = points.len() as f64;
        voltage.average = round1(points.iter().map(|p| p.voltage).sum::<f64>() / n);
        (voltage.min, voltage.max) = min_max(points.iter().map(|p| round1(p.voltage)));

        frequency.average = round1(points.iter().map(|p| p.frequency).sum::<f64>() / n);
        (frequency.min, frequency.max) = min_max(points.iter().map(|p| round1(p.frequency)));

        stability.average = (points.iter().map(|p| p.stability).sum::<f64>() / n).round();
    }

    QualitySummary {
        voltage,
        frequency,
        stability,
        total_readings: points.len(),
        range,
        region,
    }
}
