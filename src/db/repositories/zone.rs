use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::entities::{domains, prelude::*};

/// Zone row as shown in dashboard listings
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ZoneSummary {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: String,
    pub master: Option<String>,
    pub account: Option<String>,
}

impl From<domains::Model> for ZoneSummary {
    fn from(model: domains::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            zone_type: model.zone_type,
            master: model.master,
            account: model.account,
        }
    }
}

/// Read-only access to PowerDNS zones and records
pub struct ZoneRepository {
    conn: DatabaseConnection,
}

impl ZoneRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn count_zones(&self) -> Result<u64> {
        Domains::find()
            .count(&self.conn)
            .await
            .context("Failed to count zones")
    }

    pub async fn count_records(&self) -> Result<u64> {
        Records::find()
            .count(&self.conn)
            .await
            .context("Failed to count records")
    }

    /// Most recently created zones, highest id first
    pub async fn recent_zones(&self, limit: u64) -> Result<Vec<ZoneSummary>> {
        let rows = Domains::find()
            .order_by_desc(domains::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list recent zones")?;

        Ok(rows.into_iter().map(ZoneSummary::from).collect())
    }
}
