//! 停电数据仓库

use crate::errors::AppError;
use crate::models::{Outage, OutageListQuery, OutageStatus, Pagination, UpdateOutageRequest};
use crate::utils::{matches_filter, validate_time_order, TimestampIds};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// 新停电记录（ID 与创建时间由仓库生成）
#[derive(Debug, Clone)]
pub struct NewOutage {
    pub location: String,
    pub region: String,
    pub start_time: DateTime<Utc>,
    pub estimated_end_time: DateTime<Utc>,
    pub cause: String,
    pub status: OutageStatus,
    pub affected_users: i64,
    pub description: Option<String>,
}

/// 停电存储接口
#[async_trait]
pub trait OutageStore: Send + Sync {
    async fn create(&self, outage: NewOutage) -> Result<Outage, AppError>;

    /// 直接写入完整记录（用于演示数据）
    async fn insert(&self, outage: Outage) -> Result<Outage, AppError>;

    async fn get(&self, id: &str) -> Result<Option<Outage>, AppError>;

    /// 过滤 + 按开始时间降序 + 分页
    async fn list(&self, query: &OutageListQuery) -> Result<(Vec<Outage>, i64), AppError>;

    /// 进行中的停电
    async fn list_active(&self, region: Option<&str>) -> Result<Vec<Outage>, AppError>;

    /// 开始时间在 `since` 之后的停电
    async fn list_since(
        &self,
        since: DateTime<Utc>,
        region: Option<&str>,
    ) -> Result<Vec<Outage>, AppError>;

    async fn update(&self, id: &str, request: &UpdateOutageRequest) -> Result<Outage, AppError>;

    /// 标记为已解决并记录实际结束时间（只能一次）
    async fn resolve(&self, id: &str, at: DateTime<Utc>) -> Result<Outage, AppError>;
}

fn newest_first(items: &mut [Outage]) {
    items.sort_by(|a, b| b.start_time.cmp(&a.start_time));
}

/// 进程内停电仓库
#[derive(Debug, Default)]
pub struct InMemoryOutageRepository {
    outages: RwLock<Vec<Outage>>,
    ids: TimestampIds,
}

impl InMemoryOutageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotFound(format!("Outage not found: {}", id))
    }

    fn already_resolved() -> AppError {
        AppError::AlreadyResolved("Outage is already resolved".to_string())
    }
}

#[async_trait]
impl OutageStore for InMemoryOutageRepository {
    async fn create(&self, outage: NewOutage) -> Result<Outage, AppError> {
        let outage = Outage {
            id: self.ids.next_id(),
            location: outage.location,
            region: outage.region,
            start_time: outage.start_time,
            estimated_end_time: outage.estimated_end_time,
            actual_end_time: None,
            cause: outage.cause,
            status: outage.status,
            affected_users: outage.affected_users,
            description: outage.description,
            created_at: Utc::now(),
        };

        self.outages.write().await.push(outage.clone());

        Ok(outage)
    }

    async fn insert(&self, outage: Outage) -> Result<Outage, AppError> {
        self.outages.write().await.push(outage.clone());
        Ok(outage)
    }

    async fn get(&self, id: &str) -> Result<Option<Outage>, AppError> {
        let outages = self.outages.read().await;
        Ok(outages.iter().find(|o| o.id == id).cloned())
    }

    async fn list(&self, query: &OutageListQuery) -> Result<(Vec<Outage>, i64), AppError> {
        let mut filtered: Vec<Outage> = {
            let outages = self.outages.read().await;
            outages
                .iter()
                .filter(|o| query.status.map_or(true, |s| o.status == s))
                .filter(|o| matches_filter(&o.region, query.region.as_deref()))
                .filter(|o| matches_filter(&o.location, query.location.as_deref()))
                .cloned()
                .collect()
        };

        newest_first(&mut filtered);

        let total = filtered.len() as i64;
        let page = Pagination::new(query.page, query.limit, total).slice(filtered);

        Ok((page, total))
    }

    async fn list_active(&self, region: Option<&str>) -> Result<Vec<Outage>, AppError> {
        let mut active: Vec<Outage> = {
            let outages = self.outages.read().await;
            outages
                .iter()
                .filter(|o| o.status == OutageStatus::Active)
                .filter(|o| matches_filter(&o.region, region))
                .cloned()
                .collect()
        };

        newest_first(&mut active);

        Ok(active)
    }

    async fn list_since(
        &self,
        since: DateTime<Utc>,
        region: Option<&str>,
    ) -> Result<Vec<Outage>, AppError> {
        let outages = self.outages.read().await;
        Ok(outages
            .iter()
            .filter(|o| o.start_time >= since)
            .filter(|o| matches_filter(&o.region, region))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, request: &UpdateOutageRequest) -> Result<Outage, AppError> {
        let mut outages = self.outages.write().await;
        let outage = outages
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        // 已解决是终态，不允许再改状态
        if request.status.is_some() && outage.is_resolved() {
            return Err(Self::already_resolved());
        }
        // 先整体校验，失败时记录保持原样
        if let Some(estimated_end_time) = request.estimated_end_time {
            validate_time_order(outage.start_time, estimated_end_time, "estimatedEndTime")?;
        }
        if let Some(actual_end_time) = request.actual_end_time {
            validate_time_order(outage.start_time, actual_end_time, "actualEndTime")?;
        }

        if let Some(status) = request.status {
            if status == OutageStatus::Resolved {
                // 转为已解决时补齐实际结束时间
                if request.actual_end_time.is_none() && outage.actual_end_time.is_none() {
                    outage.actual_end_time = Some(Utc::now());
                }
            }
            outage.status = status;
        }
        if let Some(actual_end_time) = request.actual_end_time {
            outage.actual_end_time = Some(actual_end_time);
        }
        if let Some(estimated_end_time) = request.estimated_end_time {
            outage.estimated_end_time = estimated_end_time;
        }
        if let Some(ref cause) = request.cause {
            outage.cause = cause.clone();
        }
        if let Some(ref description) = request.description {
            outage.description = Some(description.clone());
        }

        Ok(outage.clone())
    }

    async fn resolve(&self, id: &str, at: DateTime<Utc>) -> Result<Outage, AppError> {
        let mut outages = self.outages.write().await;
        let outage = outages
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        if outage.is_resolved() {
            return Err(Self::already_resolved());
        }

        outage.status = OutageStatus::Resolved;
        outage.actual_end_time = Some(at);

        Ok(outage.clone())
    }
}
