//! 设备读数仓库

use crate::errors::AppError;
use crate::models::{PowerReading, ReadingHistoryQuery};
use crate::utils::{matches_filter, TimestampIds};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// 新读数
#[derive(Debug, Clone)]
pub struct NewReading {
    pub device_id: String,
    pub location: String,
    pub region: String,
    pub voltage: f64,
    pub frequency: f64,
    pub current: Option<f64>,
    pub power: Option<f64>,
}

/// 读数存储接口
#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn create(&self, reading: NewReading) -> Result<PowerReading, AppError>;

    async fn insert(&self, reading: PowerReading) -> Result<PowerReading, AppError>;

    /// 每个位置的最新读数
    async fn latest_per_location(
        &self,
        location: Option<&str>,
        region: Option<&str>,
    ) -> Result<Vec<PowerReading>, AppError>;

    /// 历史读数（时间降序），返回截断后的列表与过滤后总数
    async fn history(
        &self,
        query: &ReadingHistoryQuery,
    ) -> Result<(Vec<PowerReading>, usize), AppError>;

    async fn by_location(&self, location: &str, limit: usize)
        -> Result<Vec<PowerReading>, AppError>;

    /// `since` 之后的读数
    async fn list_since(
        &self,
        since: DateTime<Utc>,
        location: Option<&str>,
        region: Option<&str>,
    ) -> Result<Vec<PowerReading>, AppError>;
}

fn newest_first(items: &mut [PowerReading]) {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// 进程内读数仓库
#[derive(Debug, Default)]
pub struct InMemoryReadingRepository {
    readings: RwLock<Vec<PowerReading>>,
    ids: TimestampIds,
}

impl InMemoryReadingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadingStore for InMemoryReadingRepository {
    async fn create(&self, reading: NewReading) -> Result<PowerReading, AppError> {
        let now = Utc::now();
        let reading = PowerReading {
            id: self.ids.next_id(),
            device_id: reading.device_id,
            location: reading.location,
            region: reading.region,
            voltage: reading.voltage,
            frequency: reading.frequency,
            current: reading.current,
            power: reading.power,
            timestamp: now,
            created_at: now,
        };

        self.readings.write().await.push(reading.clone());

        Ok(reading)
    }

    async fn insert(&self, reading: PowerReading) -> Result<PowerReading, AppError> {
        self.readings.write().await.push(reading.clone());
        Ok(reading)
    }

    async fn latest_per_location(
        &self,
        location: Option<&str>,
        region: Option<&str>,
    ) -> Result<Vec<PowerReading>, AppError> {
        let readings = self.readings.read().await;
        let mut latest: Vec<PowerReading> = Vec::new();

        for reading in readings
            .iter()
            .filter(|r| matches_filter(&r.location, location))
            .filter(|r| matches_filter(&r.region, region))
        {
            match latest.iter_mut().find(|r| r.location == reading.location) {
                Some(existing) if reading.timestamp >= existing.timestamp => {
                    *existing = reading.clone();
                }
                Some(_) => {}
                None => latest.push(reading.clone()),
            }
        }

        Ok(latest)
    }

    async fn history(
        &self,
        query: &ReadingHistoryQuery,
    ) -> Result<(Vec<PowerReading>, usize), AppError> {
        let mut filtered: Vec<PowerReading> = {
            let readings = self.readings.read().await;
            readings
                .iter()
                .filter(|r| matches_filter(&r.location, query.location.as_deref()))
                .filter(|r| matches_filter(&r.region, query.region.as_deref()))
                .filter(|r| query.start_date.map_or(true, |start| r.timestamp >= start))
                .filter(|r| query.end_date.map_or(true, |end| r.timestamp <= end))
                .cloned()
                .collect()
        };

        newest_first(&mut filtered);
        let total = filtered.len();
        filtered.truncate(query.limit);

        Ok((filtered, total))
    }

    async fn by_location(
        &self,
        location: &str,
        limit: usize,
    ) -> Result<Vec<PowerReading>, AppError> {
        let mut matched: Vec<PowerReading> = {
            let readings = self.readings.read().await;
            readings
                .iter()
                .filter(|r| matches_filter(&r.location, Some(location)))
                .cloned()
                .collect()
        };

        newest_first(&mut matched);
        matched.truncate(limit);

        Ok(matched)
    }

    async fn list_since(
        &self,
        since: DateTime<Utc>,
        location: Option<&str>,
        region: Option<&str>,
    ) -> Result<Vec<PowerReading>, AppError> {
        let readings = self.readings.read().await;
        Ok(readings
            .iter()
            .filter(|r| r.timestamp >= since)
            .filter(|r| matches_filter(&r.location, location))
            .filter(|r| matches_filter(&r.region, region))
            .cloned()
            .collect())
    }
}
