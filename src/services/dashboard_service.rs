//! Domain service for the administrator dashboard summary.

use serde::Serialize;
use thiserror::Error;

use crate::db::ZoneSummary;
use crate::domain::UserId;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Caller is anonymous or not a superuser. Carries no data.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<crate::services::PermissionError> for DashboardError {
    fn from(err: crate::services::PermissionError) -> Self {
        Self::Database(err.to_string())
    }
}

/// Aggregate counts plus the most recently created zones.
///
/// # Examples
///
/// ```
/// use zonepanel::services::dashboard_service::DashboardSummary;
///
/// let summary = DashboardSummary {
///     total_zones: 3,
///     total_records: 10,
///     total_users: 2,
///     recent_zones: vec![],
/// };
///
/// assert_eq!(summary.total_records, 10);
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_zones: u64,
    pub total_records: u64,
    pub total_users: u64,
    pub recent_zones: Vec<ZoneSummary>,
}

/// Domain service trait for the dashboard.
#[async_trait::async_trait]
pub trait DashboardService: Send + Sync {
    /// Builds the summary for a superuser.
    ///
    /// # Errors
    ///
    /// [`DashboardError::Unauthorized`] for anonymous or non-superuser actors,
    /// [`DashboardError::Database`] when any query fails. No partial summary
    /// is ever returned.
    async fn summary(&self, actor: Option<UserId>) -> Result<DashboardSummary, DashboardError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_errors_become_database_errors() {
        let err: DashboardError =
            crate::services::PermissionError::Database("locked".to_string()).into();
        assert!(matches!(err, DashboardError::Database(_)));
    }

    #[test]
    fn summary_serializes_flat_counts() {
        let summary = DashboardSummary {
            total_zones: 1,
            total_records: 4,
            total_users: 2,
            recent_zones: vec![ZoneSummary {
                id: 1,
                name: "example.net".to_string(),
                zone_type: "NATIVE".to_string(),
                master: None,
                account: None,
            }],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_zones"], 1);
        assert_eq!(json["recent_zones"][0]["type"], "NATIVE");
    }
}
