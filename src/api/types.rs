use serde::Serialize;

use crate::db::User;
use crate::domain::{AuthMethod, TemplateId, UserId};
use crate::services::DashboardSummary;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Context handed to the `register` view.
///
/// Carries the live CSRF token and, after a failed submission, the message and
/// the non-secret fields to echo back. Passwords are never echoed.
#[derive(Debug, Serialize)]
pub struct RegisterFormContext {
    pub page_title: &'static str,
    pub csrf_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub username: String,
    pub fullname: String,
    pub email: String,
}

impl RegisterFormContext {
    #[must_use]
    pub const fn new(csrf_token: String) -> Self {
        Self {
            page_title: "Register",
            csrf_token,
            error: None,
            username: String::new(),
            fullname: String::new(),
            email: String::new(),
        }
    }
}

/// Context handed to the `dashboard` view.
#[derive(Debug, Serialize)]
pub struct DashboardContext {
    pub page_title: &'static str,
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: UserId,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub description: String,
    pub perm_templ: TemplateId,
    pub active: bool,
    pub auth_method: AuthMethod,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            email: user.email,
            description: user.description,
            perm_templ: user.perm_templ,
            active: user.active,
            auth_method: user.auth_method,
        }
    }
}
