//! `SeaORM` implementation of the `UserAdminService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::constants::permissions::USER_ADD_NEW;
use crate::db::{InsertUserError, NewUser, Store, User};
use crate::domain::{AuthMethod, UserId};
use crate::services::credentials::CredentialService;
use crate::services::permission_service::PermissionService;
use crate::services::user_admin_service::{CreateUserRequest, UserAdminError, UserAdminService};

pub struct SeaOrmUserAdminService {
    store: Store,
    credentials: Arc<dyn CredentialService>,
    permissions: Arc<dyn PermissionService>,
}

impl SeaOrmUserAdminService {
    #[must_use]
    pub fn new(
        store: Store,
        credentials: Arc<dyn CredentialService>,
        permissions: Arc<dyn PermissionService>,
    ) -> Self {
        Self {
            store,
            credentials,
            permissions,
        }
    }
}

#[async_trait]
impl UserAdminService for SeaOrmUserAdminService {
    async fn create_user(
        &self,
        actor: UserId,
        request: CreateUserRequest,
    ) -> Result<User, UserAdminError> {
        if !self.permissions.has_permission(actor, USER_ADD_NEW).await? {
            warn!(actor = %actor, "User creation denied: missing {USER_ADD_NEW}");
            return Err(UserAdminError::Forbidden);
        }

        request.validate()?;

        if self.store.get_template(request.perm_templ).await?.is_none() {
            return Err(UserAdminError::TemplateNotFound(request.perm_templ));
        }

        if self
            .permissions
            .template_grants_superuser(request.perm_templ)
            .await?
            && !self.permissions.is_superuser(actor).await?
        {
            warn!(actor = %actor, "Superuser template assignment denied");
            return Err(UserAdminError::Forbidden);
        }

        let username = request.username.trim().to_string();
        if self.store.username_exists(&username).await? {
            return Err(UserAdminError::DuplicateUsername);
        }

        let password_hash = if request.password.is_empty() {
            String::new()
        } else {
            self.credentials.hash_password(&request.password).await?
        };

        let user = self
            .store
            .insert_user(NewUser {
                username,
                password_hash,
                fullname: request.fullname.trim().to_string(),
                email: request.email.trim().to_string(),
                description: request.description,
                perm_templ: request.perm_templ,
                active: request.active,
                auth_method: AuthMethod::from_use_ldap(request.use_ldap),
            })
            .await
            .map_err(|e| match e {
                InsertUserError::DuplicateUsername => UserAdminError::DuplicateUsername,
                InsertUserError::Database(db) => UserAdminError::Database(db.to_string()),
            })?;

        info!(
            actor = %actor,
            user_id = %user.id,
            "Administrator created user: {}", user.username
        );

        Ok(user)
    }
}
