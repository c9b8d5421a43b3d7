//! Domain service for session login.
//!
//! Only local accounts log in here. Inactive accounts and accounts backed by
//! an external directory are rejected with the same error as a wrong password.

use serde::Serialize;
use thiserror::Error;

use crate::db::User;
use crate::domain::{AuthMethod, TemplateId, UserId};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// User info DTO for responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: UserId,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub perm_templ: TemplateId,
    pub auth_method: AuthMethod,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            email: user.email,
            perm_templ: user.perm_templ,
            auth_method: user.auth_method,
        }
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the user to bind to the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<UserInfo, AuthError>;

    /// Gets information for the user bound to a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] if the user was deleted or deactivated.
    async fn current_user(&self, id: UserId) -> Result<UserInfo, AuthError>;
}
