//! Domain service for public self-registration.
//!
//! A submission either creates exactly one user or fails with a single
//! [`RegistrationError`] and no side effects. Checks run in a fixed order and
//! stop at the first failure: CSRF token, required fields, password
//! confirmation, username uniqueness, default-role resolution.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{TemplateId, UserId};
use crate::services::csrf;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Invalid CSRF token")]
    InvalidToken,

    #[error("Required fields are missing")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("No public permission template available")]
    NoPublicRoleAvailable,

    #[error("Failed to insert user: {0}")]
    InsertFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistrationError {
    /// The single message shown on the re-rendered form.
    ///
    /// Storage failures never leak their detail.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidToken => "Invalid security token. Please reload the page and try again.",
            Self::MissingFields => "Please fill in all required fields.",
            Self::PasswordMismatch => "Passwords do not match.",
            Self::DuplicateUsername => "Username already exists. Please choose another.",
            Self::NoPublicRoleAvailable => {
                "Registration is currently unavailable. Please contact an administrator."
            }
            Self::InsertFailure(_) | Self::Internal(_) => {
                "An error occurred during registration. Please try again later."
            }
        }
    }

    /// Stable label for metrics and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidToken => "invalid_token",
            Self::MissingFields => "missing_fields",
            Self::PasswordMismatch => "password_mismatch",
            Self::DuplicateUsername => "duplicate_username",
            Self::NoPublicRoleAvailable => "no_public_role",
            Self::InsertFailure(_) => "insert_failure",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<anyhow::Error> for RegistrationError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Raw form submission as posted by the browser.
#[derive(Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

/// Submission that passed the token, presence and confirmation checks.
#[derive(Clone)]
pub struct ValidatedSubmission {
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub password: String,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub id: UserId,
    pub username: String,
    pub perm_templ: TemplateId,
}

/// Runs the checks that need no storage access.
///
/// # Errors
///
/// [`RegistrationError::InvalidToken`], [`RegistrationError::MissingFields`]
/// or [`RegistrationError::PasswordMismatch`], in that order of precedence.
pub fn validate_submission(
    session_token: Option<&str>,
    form: &RegistrationForm,
) -> Result<ValidatedSubmission, RegistrationError> {
    csrf::validate_token(session_token, form.csrf_token.as_deref())
        .map_err(|_| RegistrationError::InvalidToken)?;

    let username = form.username.trim();
    let fullname = form.fullname.trim();
    let email = form.email.trim();

    if username.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err(RegistrationError::MissingFields);
    }

    if form.password != form.password_confirm {
        return Err(RegistrationError::PasswordMismatch);
    }

    Ok(ValidatedSubmission {
        username: username.to_string(),
        fullname: fullname.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
    })
}

/// Domain service trait for guest registration.
#[async_trait::async_trait]
pub trait RegistrationService: Send + Sync {
    /// Validates the submission against the session's CSRF token and
    /// inserts the user.
    ///
    /// # Errors
    ///
    /// Any [`RegistrationError`]; no row is written when an error is returned.
    async fn register(
        &self,
        session_token: Option<&str>,
        form: &RegistrationForm,
    ) -> Result<RegisteredUser, RegistrationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(token: &str) -> RegistrationForm {
        RegistrationForm {
            username: "  alice ".to_string(),
            fullname: " Alice Example ".to_string(),
            email: " alice@example.net ".to_string(),
            password: "hunter22".to_string(),
            password_confirm: "hunter22".to_string(),
            csrf_token: Some(token.to_string()),
        }
    }

    #[test]
    fn valid_submission_is_trimmed() {
        let submission = validate_submission(Some("tok"), &form("tok")).unwrap();
        assert_eq!(submission.username, "alice");
        assert_eq!(submission.fullname, "Alice Example");
        assert_eq!(submission.email, "alice@example.net");
        assert_eq!(submission.password, "hunter22");
    }

    #[test]
    fn token_is_checked_first() {
        let mut bad = form("other");
        bad.password_confirm = "different".to_string();
        bad.username = String::new();

        let err = validate_submission(Some("tok"), &bad).err().unwrap();
        assert!(matches!(err, RegistrationError::InvalidToken));

        let err = validate_submission(None, &form("tok")).err().unwrap();
        assert!(matches!(err, RegistrationError::InvalidToken));
    }

    #[test]
    fn whitespace_only_fields_are_missing() {
        let mut bad = form("tok");
        bad.username = "   ".to_string();
        let err = validate_submission(Some("tok"), &bad).err().unwrap();
        assert!(matches!(err, RegistrationError::MissingFields));

        let mut bad = form("tok");
        bad.password = String::new();
        bad.password_confirm = String::new();
        let err = validate_submission(Some("tok"), &bad).err().unwrap();
        assert!(matches!(err, RegistrationError::MissingFields));
    }

    #[test]
    fn fullname_is_optional() {
        let mut ok = form("tok");
        ok.fullname = String::new();
        assert!(validate_submission(Some("tok"), &ok).is_ok());
    }

    #[test]
    fn mismatched_confirmation_fails() {
        let mut bad = form("tok");
        bad.password_confirm = "hunter23".to_string();
        let err = validate_submission(Some("tok"), &bad).err().unwrap();
        assert!(matches!(err, RegistrationError::PasswordMismatch));
    }

    #[test]
    fn storage_errors_get_a_generic_message() {
        let err = RegistrationError::InsertFailure("UNIQUE constraint failed: users.email".to_string());
        assert!(!err.user_message().contains("UNIQUE"));
        assert_eq!(err.kind(), "insert_failure");
    }
}
