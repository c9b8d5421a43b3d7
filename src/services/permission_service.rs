//! Authorization checks backed by permission templates.

use async_trait::async_trait;
use thiserror::Error;

use crate::constants::permissions::SUPERUSER;
use crate::db::Store;
use crate::domain::{TemplateId, UserId};

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for PermissionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Permission/authorization collaborator.
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// True iff the user exists, is active and its template grants
    /// `user_is_ueberuser`.
    async fn is_superuser(&self, actor: UserId) -> Result<bool, PermissionError>;

    /// Superusers hold every permission; others need the item on their template.
    async fn has_permission(&self, actor: UserId, item: &str) -> Result<bool, PermissionError>;

    /// Whether the template itself grants `user_is_ueberuser`.
    async fn template_grants_superuser(
        &self,
        template: TemplateId,
    ) -> Result<bool, PermissionError>;

    /// The least privileged non-superuser template, if any exists.
    async fn minimal_privilege_template_id(&self) -> Result<Option<TemplateId>, PermissionError>;
}

pub struct SeaOrmPermissionService {
    store: Store,
}

impl SeaOrmPermissionService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn active_template(&self, actor: UserId) -> Result<Option<TemplateId>, PermissionError> {
        let user = self.store.get_user(actor).await?;
        Ok(user.filter(|u| u.active).map(|u| u.perm_templ))
    }
}

#[async_trait]
impl PermissionService for SeaOrmPermissionService {
    async fn is_superuser(&self, actor: UserId) -> Result<bool, PermissionError> {
        let Some(template) = self.active_template(actor).await? else {
            return Ok(false);
        };

        Ok(self.store.template_has_item(template, SUPERUSER).await?)
    }

    async fn has_permission(&self, actor: UserId, item: &str) -> Result<bool, PermissionError> {
        let Some(template) = self.active_template(actor).await? else {
            return Ok(false);
        };

        if self.store.template_has_item(template, SUPERUSER).await? {
            return Ok(true);
        }

        Ok(self.store.template_has_item(template, item).await?)
    }

    async fn template_grants_superuser(
        &self,
        template: TemplateId,
    ) -> Result<bool, PermissionError> {
        Ok(self.store.template_has_item(template, SUPERUSER).await?)
    }

    async fn minimal_privilege_template_id(&self) -> Result<Option<TemplateId>, PermissionError> {
        Ok(self.store.minimal_privilege_template().await?)
    }
}
