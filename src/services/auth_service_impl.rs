//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::db::Store;
use crate::domain::{AuthMethod, UserId};
use crate::services::auth_service::{AuthError, AuthService, UserInfo};
use crate::services::credentials::CredentialService;

pub struct SeaOrmAuthService {
    store: Store,
    credentials: Arc<dyn CredentialService>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, credentials: Arc<dyn CredentialService>) -> Self {
        Self { store, credentials }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<UserInfo, AuthError> {
        let Some((user, digest)) = self
            .store
            .get_user_by_username_with_password(username)
            .await?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        if !user.active || user.auth_method != AuthMethod::Local {
            debug!(user_id = %user.id, "Login refused for inactive or external account");
            return Err(AuthError::InvalidCredentials);
        }

        if !self.credentials.verify_password(password, &digest).await? {
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in: {}", user.username);
        Ok(UserInfo::from(user))
    }

    async fn current_user(&self, id: UserId) -> Result<UserInfo, AuthError> {
        let user = self
            .store
            .get_user(id)
            .await?
            .filter(|u| u.active)
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserInfo::from(user))
    }
}
