//! 趋势模拟
//!
//! 以区域平均值为基线，叠加有界均匀扰动后钳位，生成历史趋势序列。
//! 随机源可注入，测试中使用固定种子。

use crate::errors::AppError;
use crate::models::{
    NoiseProfile, Region, RegionLoad, TrendBaseline, TrendPoint, TrendQuery, TrendRange,
    FREQUENCY_CLAMP, STABILITY_CLAMP, VOLTAGE_CLAMP,
};
use crate::services::RegionService;
use crate::utils::{day_label, hour_label};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

/// 趋势合成器
pub struct TrendSynthesizer<R: Rng> {
    rng: R,
}

impl<R: Rng> TrendSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// 生成 `range` 对应数量的数据点，最早的在前
    pub fn synthesize(
        &mut self,
        baseline: TrendBaseline,
        noise: NoiseProfile,
        range: TrendRange,
        now: DateTime<Utc>,
    ) -> Vec<TrendPoint> {
        (0..range.bucket_count())
            .map(|index| {
                let at = range.bucket_time(now, index);
                let time = if range.is_hourly() {
                    hour_label(&at)
                } else {
                    day_label(&at)
                };

                TrendPoint {
                    time,
                    timestamp: at,
                    voltage: self.perturb(baseline.voltage, noise.voltage_span, VOLTAGE_CLAMP),
                    frequency: self.perturb(
                        baseline.frequency,
                        noise.frequency_span,
                        FREQUENCY_CLAMP,
                    ),
                    stability: self.perturb(
                        baseline.stability,
                        noise.stability_span,
                        STABILITY_CLAMP,
                    ),
                }
            })
            .collect()
    }

    fn perturb(&mut self, base: f64, span: f64, (min, max): (f64, f64)) -> f64 {
        let noise = (self.rng.gen::<f64>() - 0.5) * span;
        (base + noise).clamp(min, max)
    }
}

/// 选择基线：指定区域用该区域平均值，否则取全部区域均值
///
/// 数据集为空时返回 `None`；指定的区域不存在时返回 404。
pub fn select_baseline(
    load: &RegionLoad,
    region: Option<&str>,
) -> Result<Option<(TrendBaseline, NoiseProfile)>, AppError> {
    if let Some(name) = region {
        let region = load
            .find(name)
            .ok_or_else(|| AppError::NotFound("Region not found".to_string()))?;

        return Ok(Some((
            TrendBaseline {
                voltage: region.average_voltage,
                frequency: region.average_frequency,
                stability: region.power_stability as f64,
            },
            NoiseProfile::REGION,
        )));
    }

    if load.regions.is_empty() {
        return Ok(None);
    }

    let count = load.regions.len() as f64;
    let mean = |f: fn(&Region) -> f64| -> f64 {
        load.regions.iter().map(f).sum::<f64>() / count
    };

    Ok(Some((
        TrendBaseline {
            voltage: mean(|r| r.average_voltage),
            frequency: mean(|r| r.average_frequency),
            stability: mean(|r| r.power_stability as f64),
        },
        NoiseProfile::AGGREGATE,
    )))
}

/// 趋势服务
pub struct TrendService {
    region_service: Arc<RegionService>,
    synthesizer: Mutex<TrendSynthesizer<StdRng>>,
}

impl TrendService {
    /// `seed` 为 `None` 时使用系统熵
    pub fn new(region_service: Arc<RegionService>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            region_service,
            synthesizer: Mutex::new(TrendSynthesizer::new(rng)),
        }
    }

    /// 查询趋势序列
    pub async fn trends(&self, query: &TrendQuery) -> Result<Vec<TrendPoint>, AppError> {
        self.series(query.region(), query.range()).await
    }

    pub async fn series(
        &self,
        region: Option<&str>,
        range: TrendRange,
    ) -> Result<Vec<TrendPoint>, AppError> {
        let load = self.region_service.load_or_empty().await;

        let Some((baseline, noise)) = select_baseline(&load, region)? else {
            return Ok(Vec::new());
        };

        let mut synthesizer = self
            .synthesizer
            .lock()
            .map_err(|_| AppError::InternalError("趋势随机源锁已损坏".to_string()))?;

        Ok(synthesizer.synthesize(baseline, noise, range, Utc::now()))
    }
}
