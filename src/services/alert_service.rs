//! 预警业务服务

use crate::errors::AppError;
use crate::models::{
    Alert, AlertListQuery, AlertSeverity, AlertStats, AlertType, CreateAlertRequest,
    PaginatedResponse, Pagination, StatsQuery, UpdateAlertRequest,
};
use crate::repositories::{AlertStore, NewAlert};
use crate::utils::{hours_ago, minutes_ago, validate_request};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 预警业务服务
pub struct AlertService {
    alert_repo: Arc<dyn AlertStore>,
}

impl AlertService {
    pub fn new(alert_repo: Arc<dyn AlertStore>) -> Self {
        Self { alert_repo }
    }

    /// 创建预警
    pub async fn create(&self, request: CreateAlertRequest) -> Result<Alert, AppError> {
        validate_request(&request, CreateAlertRequest::FIELDS)?;

        // 校验通过后必填字段一定存在
        let (Some(alert_type), Some(severity), Some(location), Some(region), Some(message)) = (
            request.alert_type,
            request.severity,
            request.location,
            request.region,
            request.message,
        ) else {
            return Err(AppError::ValidationError("Invalid request".to_string()));
        };

        let alert = self
            .alert_repo
            .create(NewAlert {
                alert_type,
                severity,
                location,
                region,
                message,
                affected_users: request.affected_users.unwrap_or(0),
            })
            .await?;

        tracing::info!(
            alert_id = %alert.id,
            alert_type = alert.alert_type.as_str(),
            severity = alert.severity.as_str(),
            region = %alert.region,
            "预警已创建"
        );

        Ok(alert)
    }

    /// 分页查询预警
    pub async fn list(&self, query: AlertListQuery) -> Result<PaginatedResponse<Alert>, AppError> {
        validate_request(&query, AlertListQuery::FIELDS)?;

        let (alerts, total) = self.alert_repo.list(&query).await?;
        let pagination = Pagination::new(query.page, query.limit, total);

        Ok(PaginatedResponse::new(alerts, pagination))
    }

    /// 未解决的预警
    pub async fn active(&self, region: Option<&str>) -> Result<Vec<Alert>, AppError> {
        self.alert_repo.list_active(region).await
    }

    /// 部分更新
    pub async fn update(&self, id: &str, request: UpdateAlertRequest) -> Result<Alert, AppError> {
        validate_request(&request, UpdateAlertRequest::FIELDS)?;

        let alert = self.alert_repo.update(id, &request).await?;

        tracing::info!(alert_id = %id, "预警已更新");

        Ok(alert)
    }

    /// 标记为已解决
    pub async fn resolve(&self, id: &str) -> Result<Alert, AppError> {
        let alert = self.alert_repo.resolve(id, Utc::now()).await?;

        tracing::info!(alert_id = %id, "预警已解决");

        Ok(alert)
    }

    /// 时间窗口内的预警统计
    pub async fn stats(&self, query: &StatsQuery) -> Result<AlertStats, AppError> {
        let cutoff = query.period().cutoff(Utc::now());
        let alerts = self
            .alert_repo
            .list_since(cutoff, query.region.as_deref())
            .await?;

        Ok(summarize(&alerts))
    }

    /// 写入演示数据
    pub async fn seed_demo_data(&self) -> Result<(), AppError> {
        for alert in demo_alerts() {
            self.alert_repo.insert(alert).await?;
        }
        tracing::debug!("预警演示数据已写入");
        Ok(())
    }
}

fn summarize(alerts: &[Alert]) -> AlertStats {
    let mut by_type = BTreeMap::new();
    let mut by_severity = BTreeMap::new();

    for alert in alerts {
        *by_type.entry(alert.alert_type.as_str()).or_insert(0) += 1;
        *by_severity.entry(alert.severity.as_str()).or_insert(0) += 1;
    }

    let resolved = alerts.iter().filter(|a| a.is_resolved()).count();

    AlertStats {
        total: alerts.len(),
        active: alerts.len() - resolved,
        resolved,
        by_type,
        by_severity,
        total_affected_users: alerts
            .iter()
            .fold(0i64, |acc, a| acc.saturating_add(a.affected_users)),
    }
}

fn demo_alerts() -> Vec<Alert> {
    let demo = |id: &str,
                alert_type: AlertType,
                severity: AlertSeverity,
                location: &str,
                region: &str,
                message: &str,
                affected_users: i64,
                at: DateTime<Utc>,
                resolved_at: Option<DateTime<Utc>>| Alert {
        id: id.to_string(),
        alert_type,
        severity,
        location: location.to_string(),
        region: region.to_string(),
        message: message.to_string(),
        affected_users,
        timestamp: at,
        resolved_at,
        created_at: at,
    };

    vec![
        demo(
            "1",
            AlertType::Undervoltage,
            AlertSeverity::High,
            "East Legon",
            "Greater Accra",
            "UNDERVOLTAGE: Risk of appliance malfunction",
            15000,
            hours_ago(2),
            None,
        ),
        demo(
            "2",
            AlertType::FrequencyInstability,
            AlertSeverity::Medium,
            "Kumasi Central",
            "Ashanti",
            "FREQUENCY INSTABILITY: Power quality issue detected",
            8500,
            minutes_ago(30),
            None,
        ),
        demo(
            "3",
            AlertType::Maintenance,
            AlertSeverity::Low,
            "Tema",
            "Greater Accra",
            "SCHEDULED MAINTENANCE: Planned maintenance in progress",
            12000,
            hours_ago(6),
            Some(hours_ago(5)),
        ),
    ]
}
