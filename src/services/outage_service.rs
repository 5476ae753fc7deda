//! 停电业务服务

use crate::errors::AppError;
use crate::models::{
    CreateOutageRequest, Outage, OutageListQuery, OutageStats, OutageStatus, PaginatedResponse,
    Pagination, StatsQuery, UpdateOutageRequest,
};
use crate::repositories::{NewOutage, OutageStore};
use crate::utils::{validate_request, validate_time_order};
use chrono::{Duration, Utc};
use std::sync::Arc;

/// 停电业务服务
pub struct OutageService {
    outage_repo: Arc<dyn OutageStore>,
}

impl OutageService {
    pub fn new(outage_repo: Arc<dyn OutageStore>) -> Self {
        Self { outage_repo }
    }

    /// 登记停电
    pub async fn create(&self, request: CreateOutageRequest) -> Result<Outage, AppError> {
        validate_request(&request, CreateOutageRequest::FIELDS)?;

        let (
            Some(location),
            Some(region),
            Some(start_time),
            Some(estimated_end_time),
            Some(cause),
            Some(status),
        ) = (
            request.location,
            request.region,
            request.start_time,
            request.estimated_end_time,
            request.cause,
            request.status,
        )
        else {
            return Err(AppError::ValidationError("Invalid request".to_string()));
        };

        validate_time_order(start_time, estimated_end_time, "estimatedEndTime")?;

        let outage = self
            .outage_repo
            .create(NewOutage {
                location,
                region,
                start_time,
                estimated_end_time,
                cause,
                status,
                affected_users: request.affected_users.unwrap_or(0),
                description: request.description,
            })
            .await?;

        tracing::info!(
            outage_id = %outage.id,
            region = %outage.region,
            location = %outage.location,
            status = outage.status.as_str(),
            "停电已登记"
        );

        Ok(outage)
    }

    /// 分页查询停电
    pub async fn list(
        &self,
        query: OutageListQuery,
    ) -> Result<PaginatedResponse<Outage>, AppError> {
        validate_request(&query, OutageListQuery::FIELDS)?;

        let (outages, total) = self.outage_repo.list(&query).await?;
        let pagination = Pagination::new(query.page, query.limit, total);

        Ok(PaginatedResponse::new(outages, pagination))
    }

    /// 进行中的停电
    pub async fn active(&self, region: Option<&str>) -> Result<Vec<Outage>, AppError> {
        self.outage_repo.list_active(region).await
    }

    /// 部分更新
    pub async fn update(
        &self,
        id: &str,
        request: UpdateOutageRequest,
    ) -> Result<Outage, AppError> {
        validate_request(&request, UpdateOutageRequest::FIELDS)?;

        let outage = self.outage_repo.update(id, &request).await?;

        tracing::info!(outage_id = %id, status = outage.status.as_str(), "停电已更新");

        Ok(outage)
    }

    /// 标记为已解决
    pub async fn resolve(&self, id: &str) -> Result<Outage, AppError> {
        let outage = self.outage_repo.resolve(id, Utc::now()).await?;

        tracing::info!(outage_id = %id, "停电已解决");

        Ok(outage)
    }

    /// 时间窗口内的停电统计（按开始时间）
    pub async fn stats(&self, query: &StatsQuery) -> Result<OutageStats, AppError> {
        let cutoff = query.period().cutoff(Utc::now());
        let outages = self
            .outage_repo
            .list_since(cutoff, query.region.as_deref())
            .await?;

        Ok(summarize(&outages))
    }

    /// 写入演示数据
    pub async fn seed_demo_data(&self) -> Result<(), AppError> {
        for outage in demo_outages() {
            self.outage_repo.insert(outage).await?;
        }
        tracing::debug!("停电演示数据已写入");
        Ok(())
    }
}

fn summarize(outages: &[Outage]) -> OutageStats {
    let count = |status: OutageStatus| outages.iter().filter(|o| o.status == status).count();

    let durations: Vec<i64> = outages
        .iter()
        .filter(|o| o.is_resolved())
        .filter_map(Outage::actual_duration_minutes)
        .collect();
    let avg_duration_minutes = if durations.is_empty() {
        0
    } else {
        (durations.iter().sum::<i64>() as f64 / durations.len() as f64).round() as i64
    };

    OutageStats {
        total: outages.len(),
        active: count(OutageStatus::Active),
        resolved: count(OutageStatus::Resolved),
        scheduled: count(OutageStatus::Scheduled),
        avg_duration_minutes,
        total_affected_users: outages
            .iter()
            .fold(0i64, |acc, o| acc.saturating_add(o.affected_users)),
    }
}

fn demo_outages() -> Vec<Outage> {
    let now = Utc::now();

    vec![
        Outage {
            id: "1".to_string(),
            location: "East Legon".to_string(),
            region: "Greater Accra".to_string(),
            start_time: now - Duration::hours(2),
            estimated_end_time: now + Duration::hours(2),
            actual_end_time: None,
            cause: "Transformer maintenance".to_string(),
            status: OutageStatus::Active,
            affected_users: 15000,
            description: Some(
                "Scheduled transformer maintenance affecting East Legon area".to_string(),
            ),
            created_at: now - Duration::hours(2),
        },
        Outage {
            id: "2".to_string(),
            location: "Kumasi Central".to_string(),
            region: "Ashanti".to_string(),
            start_time: now - Duration::minutes(30),
            estimated_end_time: now + Duration::minutes(90),
            actual_end_time: None,
            cause: "Power line fault".to_string(),
            status: OutageStatus::Active,
            affected_users: 8500,
            description: Some("Emergency repair due to power line fault".to_string()),
            created_at: now - Duration::minutes(30),
        },
        Outage {
            id: "3".to_string(),
            location: "Tema".to_string(),
            region: "Greater Accra".to_string(),
            start_time: now - Duration::hours(6),
            estimated_end_time: now - Duration::hours(5),
            actual_end_time: Some(now - Duration::hours(5)),
            cause: "Equipment failure".to_string(),
            status: OutageStatus::Resolved,
            affected_users: 12000,
            description: Some("Equipment failure resolved successfully".to_string()),
            created_at: now - Duration::hours(6),
        },
        Outage {
            id: "4".to_string(),
            location: "Takoradi".to_string(),
            region: "Western".to_string(),
            start_time: now + Duration::hours(24),
            estimated_end_time: now + Duration::hours(30),
            actual_end_time: None,
            cause: "Planned maintenance".to_string(),
            status: OutageStatus::Scheduled,
            affected_users: 20000,
            description: Some("Planned maintenance for system upgrade".to_string()),
            created_at: now,
        },
    ]
}
