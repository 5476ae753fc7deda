//! 预警数据仓库
//!
//! [`AlertStore`] 是服务层依赖的存储接口，目前只有进程内实现；
//! 换成数据库实现时调用方无需改动。

use crate::errors::AppError;
use crate::models::{
    Alert, AlertListQuery, AlertSeverity, AlertStatusFilter, AlertType, Pagination,
    UpdateAlertRequest,
};
use crate::utils::{matches_filter, TimestampIds};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tokio::sync::RwLock;

/// 新预警（ID 与时间戳由仓库生成）
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub location: String,
    pub region: String,
    pub message: String,
    pub affected_users: i64,
}

/// 预警存储接口
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// 新增预警
    async fn create(&self, alert: NewAlert) -> Result<Alert, AppError>;

    /// 直接写入完整记录（用于演示数据）
    async fn insert(&self, alert: Alert) -> Result<Alert, AppError>;

    /// 按 ID 查询
    async fn get(&self, id: &str) -> Result<Option<Alert>, AppError>;

    /// 过滤 + 排序 + 分页，返回当前页与过滤后总数
    async fn list(&self, query: &AlertListQuery) -> Result<(Vec<Alert>, i64), AppError>;

    /// 未解决的预警，按级别、时间降序
    async fn list_active(&self, region: Option<&str>) -> Result<Vec<Alert>, AppError>;

    /// `since` 之后产生的预警
    async fn list_since(
        &self,
        since: DateTime<Utc>,
        region: Option<&str>,
    ) -> Result<Vec<Alert>, AppError>;

    /// 部分更新
    async fn update(&self, id: &str, request: &UpdateAlertRequest) -> Result<Alert, AppError>;

    /// 标记为已解决（只能一次）
    async fn resolve(&self, id: &str, at: DateTime<Utc>) -> Result<Alert, AppError>;
}

/// 预警排序：级别降序，同级按时间降序
pub fn severity_then_recent(a: &Alert, b: &Alert) -> Ordering {
    b.severity
        .cmp(&a.severity)
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

/// 进程内预警仓库
#[derive(Debug, Default)]
pub struct InMemoryAlertRepository {
    alerts: RwLock<Vec<Alert>>,
    ids: TimestampIds,
}

impl InMemoryAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotFound(format!("Alert not found: {}", id))
    }
}

#[async_trait]
impl AlertStore for InMemoryAlertRepository {
    async fn create(&self, alert: NewAlert) -> Result<Alert, AppError> {
        let now = Utc::now();
        let alert = Alert {
            id: self.ids.next_id(),
            alert_type: alert.alert_type,
            severity: alert.severity,
            location: alert.location,
            region: alert.region,
            message: alert.message,
            affected_users: alert.affected_users,
            timestamp: now,
            resolved_at: None,
            created_at: now,
        };

        self.alerts.write().await.push(alert.clone());

        Ok(alert)
    }

    async fn insert(&self, alert: Alert) -> Result<Alert, AppError> {
        self.alerts.write().await.push(alert.clone());
        Ok(alert)
    }

    async fn get(&self, id: &str) -> Result<Option<Alert>, AppError> {
        let alerts = self.alerts.read().await;
        Ok(alerts.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self, query: &AlertListQuery) -> Result<(Vec<Alert>, i64), AppError> {
        let mut filtered: Vec<Alert> = {
            let alerts = self.alerts.read().await;
            alerts
                .iter()
                .filter(|a| query.alert_type.map_or(true, |t| a.alert_type == t))
                .filter(|a| query.severity.map_or(true, |s| a.severity == s))
                .filter(|a| matches_filter(&a.region, query.region.as_deref()))
                .filter(|a| match query.status {
                    AlertStatusFilter::All => true,
                    AlertStatusFilter::Active => !a.is_resolved(),
                    AlertStatusFilter::Resolved => a.is_resolved(),
                })
                .cloned()
                .collect()
        };

        filtered.sort_by(severity_then_recent);

        let total = filtered.len() as i64;
        let page = Pagination::new(query.page, query.limit, total).slice(filtered);

        Ok((page, total))
    }

    async fn list_active(&self, region: Option<&str>) -> Result<Vec<Alert>, AppError> {
        let mut active: Vec<Alert> = {
            let alerts = self.alerts.read().await;
            alerts
                .iter()
                .filter(|a| !a.is_resolved())
                .filter(|a| matches_filter(&a.region, region))
                .cloned()
                .collect()
        };

        active.sort_by(severity_then_recent);

        Ok(active)
    }

    async fn list_since(
        &self,
        since: DateTime<Utc>,
        region: Option<&str>,
    ) -> Result<Vec<Alert>, AppError> {
        let alerts = self.alerts.read().await;
        Ok(alerts
            .iter()
            .filter(|a| a.timestamp >= since)
            .filter(|a| matches_filter(&a.region, region))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, request: &UpdateAlertRequest) -> Result<Alert, AppError> {
        let mut alerts = self.alerts.write().await;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        if let Some(resolved_at) = request.resolved_at {
            if alert.is_resolved() {
                return Err(AppError::AlreadyResolved(
                    "Alert is already resolved".to_string(),
                ));
            }
            alert.resolved_at = Some(resolved_at);
        }
        if let Some(ref message) = request.message {
            alert.message = message.clone();
        }
        if let Some(severity) = request.severity {
            alert.severity = severity;
        }

        Ok(alert.clone())
    }

    async fn resolve(&self, id: &str, at: DateTime<Utc>) -> Result<Alert, AppError> {
        let mut alerts = self.alerts.write().await;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        if alert.is_resolved() {
            return Err(AppError::AlreadyResolved(
                "Alert is already resolved".to_string(),
            ));
        }

        alert.resolved_at = Some(at);

        Ok(alert.clone())
    }
}
