use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{TemplateId, UserId};

pub mod migrator;
pub mod repositories;

pub use repositories::permission::{PermissionTemplate, TemplateWithItems};
pub use repositories::user::{GuestUser, InsertUserError, NewUser, User};
pub use repositories::zone::ZoneSummary;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        // Connections to an in-memory database must share one handle.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Names of the migrations recorded as applied.
    pub async fn applied_migrations(&self) -> Result<Vec<String>> {
        use sea_orm_migration::MigratorTrait;

        let applied = migrator::Migrator::get_applied_migrations(&self.conn).await?;
        Ok(applied.iter().map(|m| m.name().to_string()).collect())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn permission_repo(&self) -> repositories::permission::PermissionRepository {
        repositories::permission::PermissionRepository::new(self.conn.clone())
    }

    fn zone_repo(&self) -> repositories::zone::ZoneRepository {
        repositories::zone::ZoneRepository::new(self.conn.clone())
    }

    // ========== User Repository Methods ==========

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_username_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>> {
        self.user_repo()
            .get_by_username_with_password(username)
            .await
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        self.user_repo().username_exists(username).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn insert_guest_user(&self, guest: GuestUser) -> Result<User, InsertUserError> {
        self.user_repo().insert_guest(guest).await
    }

    pub async fn insert_user(&self, user: NewUser) -> Result<User, InsertUserError> {
        self.user_repo().insert(user).await
    }

    // ========== Permission Repository Methods ==========

    pub async fn find_template_by_name(&self, name: &str) -> Result<Option<PermissionTemplate>> {
        self.permission_repo().find_template_by_name(name).await
    }

    pub async fn get_template(&self, id: TemplateId) -> Result<Option<PermissionTemplate>> {
        self.permission_repo().get_template(id).await
    }

    pub async fn template_has_item(&self, id: TemplateId, item: &str) -> Result<bool> {
        self.permission_repo().template_has_item(id, item).await
    }

    pub async fn list_templates(&self) -> Result<Vec<TemplateWithItems>> {
        self.permission_repo().list_templates().await
    }

    pub async fn minimal_privilege_template(&self) -> Result<Option<TemplateId>> {
        self.permission_repo().minimal_privilege_template().await
    }

    pub async fn create_template(
        &self,
        name: &str,
        descr: &str,
        items: &[String],
    ) -> Result<TemplateId> {
        self.permission_repo()
            .create_template(name, descr, items)
            .await
    }

    // ========== Zone Repository Methods ==========

    pub async fn count_zones(&self) -> Result<u64> {
        self.zone_repo().count_zones().await
    }

    pub async fn count_records(&self) -> Result<u64> {
        self.zone_repo().count_records().await
    }

    pub async fn recent_zones(&self, limit: u64) -> Result<Vec<ZoneSummary>> {
        self.zone_repo().recent_zones(limit).await
    }
}
