//! Default-role selection for self-registered users.
//!
//! Named templates are tried in preference order, then the permission
//! subsystem's minimal-privilege template. A candidate is only accepted when
//! it is neither the configured administrator template nor a template that
//! grants superuser rights.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RegistrationConfig;
use crate::db::Store;
use crate::domain::TemplateId;
use crate::services::permission_service::PermissionService;

#[derive(Debug, Error)]
pub enum RoleResolutionError {
    #[error("No public role available")]
    NoPublicRole,

    #[error("Template lookup failed: {0}")]
    Lookup(String),
}

/// Read access to permission templates as needed by role resolution.
#[async_trait]
pub trait TemplateDirectory: Send + Sync {
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<TemplateId>>;

    async fn grants_superuser(&self, template: TemplateId) -> anyhow::Result<bool>;

    /// Fallback supplied by the permission subsystem.
    async fn minimal_privilege(&self) -> anyhow::Result<Option<TemplateId>>;
}

/// Templates from the store, fallback from the permission service.
pub struct StoreTemplateDirectory {
    store: Store,
    permissions: Arc<dyn PermissionService>,
}

impl StoreTemplateDirectory {
    #[must_use]
    pub fn new(store: Store, permissions: Arc<dyn PermissionService>) -> Self {
        Self { store, permissions }
    }
}

#[async_trait]
impl TemplateDirectory for StoreTemplateDirectory {
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<TemplateId>> {
        Ok(self.store.find_template_by_name(name).await?.map(|t| t.id))
    }

    async fn grants_superuser(&self, template: TemplateId) -> anyhow::Result<bool> {
        Ok(self.permissions.template_grants_superuser(template).await?)
    }

    async fn minimal_privilege(&self) -> anyhow::Result<Option<TemplateId>> {
        Ok(self.permissions.minimal_privilege_template_id().await?)
    }
}

#[derive(Debug, Clone)]
pub struct RolePolicy {
    pub preferred: Vec<String>,
    pub admin_template: TemplateId,
}

impl RolePolicy {
    #[must_use]
    pub fn from_config(config: &RegistrationConfig) -> Self {
        Self {
            preferred: config.preferred_templates.clone(),
            admin_template: TemplateId::new(config.admin_template_id),
        }
    }
}

async fn is_public(
    directory: &dyn TemplateDirectory,
    policy: &RolePolicy,
    candidate: TemplateId,
) -> anyhow::Result<bool> {
    if candidate == policy.admin_template {
        return Ok(false);
    }
    Ok(!directory.grants_superuser(candidate).await?)
}

/// Picks the template a guest registration is assigned.
///
/// # Errors
///
/// [`RoleResolutionError::NoPublicRole`] when neither a named template nor
/// an acceptable fallback exists, or the fallback lookup fails.
/// [`RoleResolutionError::Lookup`] when a named lookup hits a storage error.
pub async fn resolve_default_template(
    directory: &dyn TemplateDirectory,
    policy: &RolePolicy,
) -> Result<TemplateId, RoleResolutionError> {
    for name in &policy.preferred {
        let found = directory
            .find_by_name(name)
            .await
            .map_err(|e| RoleResolutionError::Lookup(e.to_string()))?;

        let Some(candidate) = found else {
            continue;
        };

        if is_public(directory, policy, candidate)
            .await
            .map_err(|e| RoleResolutionError::Lookup(e.to_string()))?
        {
            debug!(template = %candidate, "Resolved registration role by name '{name}'");
            return Ok(candidate);
        }

        warn!(template = %candidate, "Template '{name}' grants administrative rights, skipping");
    }

    let fallback = match directory.minimal_privilege().await {
        Ok(Some(candidate)) => candidate,
        Ok(None) => return Err(RoleResolutionError::NoPublicRole),
        Err(e) => {
            warn!("Minimal privilege lookup failed: {e}");
            return Err(RoleResolutionError::NoPublicRole);
        }
    };

    match is_public(directory, policy, fallback).await {
        Ok(true) => {
            debug!(template = %fallback, "Resolved registration role by minimal privilege");
            Ok(fallback)
        }
        Ok(false) => {
            warn!(template = %fallback, "Minimal privilege template is administrative, refusing");
            Err(RoleResolutionError::NoPublicRole)
        }
        Err(e) => {
            warn!("Minimal privilege check failed: {e}");
            Err(RoleResolutionError::NoPublicRole)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    struct FakeDirectory {
        by_name: HashMap<&'static str, i32>,
        superuser: HashSet<i32>,
        fallback: Result<Option<i32>, &'static str>,
    }

    impl FakeDirectory {
        fn new(templates: &[(i32, &'static str)]) -> Self {
            Self {
                by_name: templates.iter().map(|(id, name)| (*name, *id)).collect(),
                superuser: HashSet::from([1]),
                fallback: Ok(None),
            }
        }

        fn with_fallback(mut self, fallback: Result<Option<i32>, &'static str>) -> Self {
            self.fallback = fallback;
            self
        }
    }

    #[async_trait]
    impl TemplateDirectory for FakeDirectory {
        async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<TemplateId>> {
            Ok(self.by_name.get(name).copied().map(TemplateId::new))
        }

        async fn grants_superuser(&self, template: TemplateId) -> anyhow::Result<bool> {
            Ok(self.superuser.contains(&template.value()))
        }

        async fn minimal_privilege(&self) -> anyhow::Result<Option<TemplateId>> {
            self.fallback
                .map(|id| id.map(TemplateId::new))
                .map_err(|e| anyhow::anyhow!(e))
        }
    }

    fn policy() -> RolePolicy {
        RolePolicy::from_config(&RegistrationConfig::default())
    }

    #[tokio::test]
    async fn prefers_user_over_zone_manager() {
        let directory = FakeDirectory::new(&[(1, "Administrator"), (2, "Zone Manager"), (3, "User")]);

        let picked = resolve_default_template(&directory, &policy()).await.unwrap();
        assert_eq!(picked, TemplateId::new(3));
    }

    #[tokio::test]
    async fn falls_through_to_read_only_never_admin() {
        let directory = FakeDirectory::new(&[(1, "Administrator"), (5, "Read Only")]);

        let picked = resolve_default_template(&directory, &policy()).await.unwrap();
        assert_eq!(picked, TemplateId::new(5));
    }

    #[tokio::test]
    async fn fallback_used_when_no_name_matches() {
        let directory = FakeDirectory::new(&[(1, "Administrator"), (9, "Guests")])
            .with_fallback(Ok(Some(9)));

        let picked = resolve_default_template(&directory, &policy()).await.unwrap();
        assert_eq!(picked, TemplateId::new(9));
    }

    #[tokio::test]
    async fn fallback_equal_to_admin_is_refused() {
        let directory =
            FakeDirectory::new(&[(1, "Administrator")]).with_fallback(Ok(Some(1)));

        let err = resolve_default_template(&directory, &policy()).await.unwrap_err();
        assert!(matches!(err, RoleResolutionError::NoPublicRole));
    }

    #[tokio::test]
    async fn absent_or_failing_fallback_is_refused() {
        let directory = FakeDirectory::new(&[(1, "Administrator")]);
        let err = resolve_default_template(&directory, &policy()).await.unwrap_err();
        assert!(matches!(err, RoleResolutionError::NoPublicRole));

        let directory = FakeDirectory::new(&[]).with_fallback(Err("connection reset"));
        let err = resolve_default_template(&directory, &policy()).await.unwrap_err();
        assert!(matches!(err, RoleResolutionError::NoPublicRole));
    }

    #[tokio::test]
    async fn named_template_with_admin_id_is_skipped() {
        // A table where "User" was renamed onto the administrator row.
        let directory = FakeDirectory::new(&[(1, "User"), (4, "Zone Manager")]);

        let picked = resolve_default_template(&directory, &policy()).await.unwrap();
        assert_eq!(picked, TemplateId::new(4));
    }

    #[tokio::test]
    async fn named_superuser_template_is_skipped() {
        let mut directory = FakeDirectory::new(&[(1, "Administrator"), (6, "User"), (7, "Read Only")]);
        directory.superuser.insert(6);

        let picked = resolve_default_template(&directory, &policy()).await.unwrap();
        assert_eq!(picked, TemplateId::new(7));
    }

    #[tokio::test]
    async fn custom_preference_order_is_honoured() {
        let directory = FakeDirectory::new(&[(2, "Zone Manager"), (3, "User")]);
        let policy = RolePolicy {
            preferred: vec!["Zone Manager".to_string(), "User".to_string()],
            admin_template: TemplateId::new(1),
        };

        let picked = resolve_default_template(&directory, &policy).await.unwrap();
        assert_eq!(picked, TemplateId::new(2));
    }
}
