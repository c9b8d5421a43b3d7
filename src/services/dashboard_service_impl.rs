//! `SeaORM` implementation of the `DashboardService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::constants::limits::RECENT_ZONES;
use crate::db::Store;
use crate::domain::UserId;
use crate::services::dashboard_service::{DashboardError, DashboardService, DashboardSummary};
use crate::services::permission_service::PermissionService;

pub struct SeaOrmDashboardService {
    store: Store,
    permissions: Arc<dyn PermissionService>,
}

impl SeaOrmDashboardService {
    #[must_use]
    pub fn new(store: Store, permissions: Arc<dyn PermissionService>) -> Self {
        Self { store, permissions }
    }
}

#[async_trait]
impl DashboardService for SeaOrmDashboardService {
    async fn summary(&self, actor: Option<UserId>) -> Result<DashboardSummary, DashboardError> {
        let Some(actor) = actor else {
            return Err(DashboardError::Unauthorized);
        };

        if !self.permissions.is_superuser(actor).await? {
            debug!(user_id = %actor, "Dashboard denied to non-superuser");
            return Err(DashboardError::Unauthorized);
        }

        Ok(DashboardSummary {
            total_zones: self.store.count_zones().await?,
            total_records: self.store.count_records().await?,
            total_users: self.store.count_users().await?,
            recent_zones: self.store.recent_zones(RECENT_ZONES).await?,
        })
    }
}
