//! `SeaORM` implementation of the `RegistrationService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::{GuestUser, InsertUserError, Store};
use crate::services::credentials::CredentialService;
use crate::services::registration_service::{
    RegisteredUser, RegistrationError, RegistrationForm, RegistrationService, validate_submission,
};
use crate::services::role_resolution::{
    RolePolicy, RoleResolutionError, TemplateDirectory, resolve_default_template,
};

pub struct SeaOrmRegistrationService {
    store: Store,
    credentials: Arc<dyn CredentialService>,
    directory: Arc<dyn TemplateDirectory>,
    policy: RolePolicy,
}

impl SeaOrmRegistrationService {
    #[must_use]
    pub fn new(
        store: Store,
        credentials: Arc<dyn CredentialService>,
        directory: Arc<dyn TemplateDirectory>,
        policy: RolePolicy,
    ) -> Self {
        Self {
            store,
            credentials,
            directory,
            policy,
        }
    }
}

#[async_trait]
impl RegistrationService for SeaOrmRegistrationService {
    async fn register(
        &self,
        session_token: Option<&str>,
        form: &RegistrationForm,
    ) -> Result<RegisteredUser, RegistrationError> {
        let submission = validate_submission(session_token, form)?;

        // Advisory only: the unique index decides under concurrency.
        if self.store.username_exists(&submission.username).await? {
            return Err(RegistrationError::DuplicateUsername);
        }

        let template = resolve_default_template(self.directory.as_ref(), &self.policy)
            .await
            .map_err(|e| match e {
                RoleResolutionError::NoPublicRole => RegistrationError::NoPublicRoleAvailable,
                RoleResolutionError::Lookup(msg) => RegistrationError::Internal(msg),
            })?;

        let password_hash = self.credentials.hash_password(&submission.password).await?;

        let user = self
            .store
            .insert_guest_user(GuestUser {
                username: submission.username,
                password_hash,
                fullname: submission.fullname,
                email: submission.email,
                perm_templ: template,
            })
            .await
            .map_err(|e| match e {
                InsertUserError::DuplicateUsername => RegistrationError::DuplicateUsername,
                InsertUserError::Database(db) => {
                    warn!("Guest user insert failed: {db}");
                    RegistrationError::InsertFailure(db.to_string())
                }
            })?;

        info!(
            user_id = %user.id,
            template = %user.perm_templ,
            "New user registered: {}", user.username
        );

        Ok(RegisteredUser {
            id: user.id,
            username: user.username,
            perm_templ: user.perm_templ,
        })
    }
}
