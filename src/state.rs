use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    Argon2Credentials, AuthService, CredentialService, DashboardService, PermissionService,
    RegistrationService, RolePolicy, SeaOrmAuthService, SeaOrmDashboardService,
    SeaOrmPermissionService, SeaOrmRegistrationService, SeaOrmUserAdminService,
    StoreTemplateDirectory, UserAdminService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub credentials: Arc<dyn CredentialService>,

    pub permissions: Arc<dyn PermissionService>,

    pub registration_service: Arc<dyn RegistrationService>,

    pub dashboard_service: Arc<dyn DashboardService>,

    pub auth_service: Arc<dyn AuthService>,

    pub user_admin_service: Arc<dyn UserAdminService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires every service around an already-open store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let credentials = Arc::new(Argon2Credentials::new(config.security.clone()))
            as Arc<dyn CredentialService>;

        let permissions =
            Arc::new(SeaOrmPermissionService::new(store.clone())) as Arc<dyn PermissionService>;

        let directory = Arc::new(StoreTemplateDirectory::new(
            store.clone(),
            permissions.clone(),
        ));

        let registration_service = Arc::new(SeaOrmRegistrationService::new(
            store.clone(),
            credentials.clone(),
            directory,
            RolePolicy::from_config(&config.registration),
        )) as Arc<dyn RegistrationService>;

        let dashboard_service = Arc::new(SeaOrmDashboardService::new(
            store.clone(),
            permissions.clone(),
        )) as Arc<dyn DashboardService>;

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), credentials.clone()))
            as Arc<dyn AuthService>;

        let user_admin_service = Arc::new(SeaOrmUserAdminService::new(
            store.clone(),
            credentials.clone(),
            permissions.clone(),
        )) as Arc<dyn UserAdminService>;

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            credentials,
            permissions,
            registration_service,
            dashboard_service,
            auth_service,
            user_admin_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
