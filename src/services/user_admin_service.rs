//! Domain service for administrator-driven account creation.
//!
//! Unlike guest registration, every column is caller-supplied and the actor
//! must hold `user_add_new`. Handing out a superuser template additionally
//! requires the actor to be a superuser.

use serde::Deserialize;
use thiserror::Error;

use crate::constants::limits::MAX_USERNAME_LENGTH;
use crate::db::User;
use crate::domain::{TemplateId, UserId};

#[derive(Debug, Error)]
pub enum UserAdminError {
    #[error("Permission denied")]
    Forbidden,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Permission template {0} not found")]
    TemplateNotFound(TemplateId),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for UserAdminError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<crate::services::PermissionError> for UserAdminError {
    fn from(err: crate::services::PermissionError) -> Self {
        Self::Database(err.to_string())
    }
}

fn default_active() -> bool {
    true
}

/// Request body for `POST /api/admin/users`.
#[derive(Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub description: String,
    pub perm_templ: TemplateId,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub use_ldap: bool,
}

impl CreateUserRequest {
    /// Field checks that need no storage access.
    ///
    /// # Errors
    ///
    /// [`UserAdminError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), UserAdminError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(UserAdminError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }

        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(UserAdminError::Validation(format!(
                "Username must be {MAX_USERNAME_LENGTH} characters or less"
            )));
        }

        // External accounts authenticate elsewhere and may have no local password.
        if self.password.is_empty() && !self.use_ldap {
            return Err(UserAdminError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Domain service trait for user administration.
#[async_trait::async_trait]
pub trait UserAdminService: Send + Sync {
    /// Creates a user on behalf of an authenticated administrator.
    ///
    /// # Errors
    ///
    /// [`UserAdminError::Forbidden`] when the actor lacks `user_add_new`, or
    /// assigns a superuser template without being a superuser.
    async fn create_user(
        &self,
        actor: UserId,
        request: CreateUserRequest,
    ) -> Result<User, UserAdminError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateUserRequest {
        serde_json::from_value(serde_json::json!({
            "username": "bob",
            "password": "s3cret",
            "perm_templ": 3
        }))
        .unwrap()
    }

    #[test]
    fn defaults_apply_to_omitted_fields() {
        let req = request();
        assert!(req.active);
        assert!(!req.use_ldap);
        assert_eq!(req.perm_templ, TemplateId::new(3));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_username_is_rejected() {
        let mut req = request();
        req.username = "  ".to_string();
        assert!(matches!(req.validate(), Err(UserAdminError::Validation(_))));
    }

    #[test]
    fn overlong_username_is_rejected() {
        let mut req = request();
        req.username = "x".repeat(MAX_USERNAME_LENGTH + 1);
        assert!(matches!(req.validate(), Err(UserAdminError::Validation(_))));
    }

    #[test]
    fn ldap_users_may_omit_password() {
        let mut req = request();
        req.password = String::new();
        assert!(req.validate().is_err());

        req.use_ldap = true;
        assert!(req.validate().is_ok());
    }
}
