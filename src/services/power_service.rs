//! 设备读数服务

use crate::errors::AppError;
use crate::models::{
    CreateReadingRequest, LocationQuery, PowerReading, ReadingAlert, ReadingFilter,
    ReadingHistoryQuery, ReadingStats, ReadingStatsQuery, StatsPeriod,
};
use crate::repositories::{NewReading, ReadingStore};
use crate::services::alert_generator::derive_reading_alerts;
use crate::utils::{minutes_ago, validate_request, validate_time_order};
use chrono::Utc;
use std::sync::Arc;

/// 设备读数服务
pub struct PowerService {
    reading_repo: Arc<dyn ReadingStore>,
}

impl PowerService {
    pub fn new(reading_repo: Arc<dyn ReadingStore>) -> Self {
        Self { reading_repo }
    }

    /// 上报读数，返回读数与触发的即时预警
    pub async fn submit(
        &self,
        request: CreateReadingRequest,
    ) -> Result<(PowerReading, Vec<ReadingAlert>), AppError> {
        validate_request(&request, CreateReadingRequest::FIELDS)?;

        let (Some(voltage), Some(frequency), Some(location), Some(region), Some(device_id)) = (
            request.voltage,
            request.frequency,
            request.location,
            request.region,
            request.device_id,
        ) else {
            return Err(AppError::ValidationError("Invalid request".to_string()));
        };

        let reading = self
            .reading_repo
            .create(NewReading {
                device_id,
                location,
                region,
                voltage,
                frequency,
                current: request.current,
                power: request.power,
            })
            .await?;

        let alerts = derive_reading_alerts(&reading);
        if !alerts.is_empty() {
            tracing::warn!(
                device_id = %reading.device_id,
                location = %reading.location,
                voltage = reading.voltage,
                frequency = reading.frequency,
                alerts = alerts.len(),
                "读数超出阈值"
            );
        }

        tracing::debug!(reading_id = %reading.id, device_id = %reading.device_id, "读数已记录");

        Ok((reading, alerts))
    }

    /// 各位置最新读数
    pub async fn current(&self, filter: &ReadingFilter) -> Result<Vec<PowerReading>, AppError> {
        self.reading_repo
            .latest_per_location(filter.location.as_deref(), filter.region.as_deref())
            .await
    }

    /// 历史读数，返回截断后的列表与总数
    pub async fn history(
        &self,
        query: &ReadingHistoryQuery,
    ) -> Result<(Vec<PowerReading>, usize), AppError> {
        validate_request(query, ReadingHistoryQuery::FIELDS)?;
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            validate_time_order(start, end, "endDate")?;
        }

        self.reading_repo.history(query).await
    }

    /// 某位置的读数；无记录时返回 404
    pub async fn by_location(
        &self,
        location: &str,
        query: &LocationQuery,
    ) -> Result<Vec<PowerReading>, AppError> {
        validate_request(query, LocationQuery::FIELDS)?;

        let readings = self.reading_repo.by_location(location, query.limit).await?;
        if readings.is_empty() {
            return Err(AppError::NotFound(
                "No readings found for this location".to_string(),
            ));
        }

        Ok(readings)
    }

    /// 时间窗口内的读数统计；无数据时各项为 0
    pub async fn stats(
        &self,
        query: &ReadingStatsQuery,
    ) -> Result<(ReadingStats, StatsPeriod), AppError> {
        let period = StatsPeriod::parse_lenient(query.period.as_deref());
        let readings = self
            .reading_repo
            .list_since(
                period.cutoff(Utc::now()),
                query.location.as_deref(),
                query.region.as_deref(),
            )
            .await?;

        Ok((summarize(&readings), period))
    }

    /// 写入演示数据
    pub async fn seed_demo_data(&self) -> Result<(), AppError> {
        for reading in demo_readings() {
            self.reading_repo.insert(reading).await?;
        }
        tracing::debug!("读数演示数据已写入");
        Ok(())
    }
}

fn summarize(readings: &[PowerReading]) -> ReadingStats {
    if readings.is_empty() {
        return ReadingStats::default();
    }

    let n = readings.len() as f64;
    let voltages = readings.iter().map(|r| r.voltage);
    let frequencies = readings.iter().map(|r| r.frequency);

    ReadingStats {
        avg_voltage: voltages.clone().sum::<f64>() / n,
        avg_frequency: frequencies.clone().sum::<f64>() / n,
        min_voltage: voltages.clone().fold(f64::INFINITY, f64::min),
        max_voltage: voltages.fold(f64::NEG_INFINITY, f64::max),
        min_frequency: frequencies.clone().fold(f64::INFINITY, f64::min),
        max_frequency: frequencies.fold(f64::NEG_INFINITY, f64::max),
        total_readings: readings.len(),
    }
}

fn demo_readings() -> Vec<PowerReading> {
    let now = Utc::now();
    let earlier = minutes_ago(5);

    vec![
        PowerReading {
            id: "1".to_string(),
            device_id: "sensor-001".to_string(),
            location: "Accra Central".to_string(),
            region: "Greater Accra".to_string(),
            voltage: 230.5,
            frequency: 50.1,
            current: Some(15.2),
            power: Some(3500.0),
            timestamp: now,
            created_at: now,
        },
        PowerReading {
            id: "2".to_string(),
            device_id: "sensor-002".to_string(),
            location: "Kumasi Central".to_string(),
            region: "Ashanti".to_string(),
            voltage: 228.3,
            frequency: 49.8,
            current: Some(12.7),
            power: Some(2900.0),
            timestamp: earlier,
            created_at: earlier,
        },
    ]
}
