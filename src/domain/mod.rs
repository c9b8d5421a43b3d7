//! Domain types for users and permission templates.
//!
//! Newtype identifiers keep user ids and template ids from being mixed up
//! when they flow between the registration, dashboard and admin services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a row in `users`.
///
/// # Examples
///
/// ```rust
/// use zonepanel::domain::UserId;
///
/// let id = UserId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "UserId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(Self)
    }
}

/// Unique identifier of a permission template (`perm_templ.id`).
///
/// The administrator template is identified by one of these, configured in
/// [`crate::config::RegistrationConfig::admin_template_id`].
///
/// # Examples
///
/// ```rust
/// use zonepanel::domain::TemplateId;
///
/// let admin = TemplateId::new(1);
/// assert_ne!(admin, TemplateId::new(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TemplateId(i32);

impl TemplateId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "TemplateId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TemplateId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl From<TemplateId> for i32 {
    fn from(id: TemplateId) -> Self {
        id.0
    }
}

impl Serialize for TemplateId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(Self)
    }
}

/// How a user proves their identity.
///
/// Stored as the `use_ldap` flag on the `users` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Password hash held in `users.password`.
    #[default]
    Local,
    /// Credentials checked by an external directory (LDAP).
    External,
}

impl AuthMethod {
    #[must_use]
    pub const fn from_use_ldap(use_ldap: bool) -> Self {
        if use_ldap { Self::External } else { Self::Local }
    }

    #[must_use]
    pub const fn uses_ldap(self) -> bool {
        matches!(self, Self::External)
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::External => write!(f, "external"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&TemplateId::new(5)).unwrap();
        assert_eq!(json, "5");

        let id: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(id, UserId::new(42));
    }

    #[test]
    fn auth_method_maps_ldap_flag() {
        assert_eq!(AuthMethod::from_use_ldap(false), AuthMethod::Local);
        assert_eq!(AuthMethod::from_use_ldap(true), AuthMethod::External);
        assert!(AuthMethod::External.uses_ldap());
        assert!(!AuthMethod::Local.uses_ldap());
    }
}
