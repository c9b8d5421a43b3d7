use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};
use thiserror::Error;
use tracing::info;

use crate::constants::registration::GUEST_DESCRIPTION;
use crate::domain::{AuthMethod, TemplateId, UserId};
use crate::entities::users;

/// User data returned from repository (without password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub description: String,
    pub perm_templ: TemplateId,
    pub active: bool,
    pub auth_method: AuthMethod,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            username: model.username,
            fullname: model.fullname,
            email: model.email,
            description: model.description,
            perm_templ: TemplateId::new(model.perm_templ),
            active: model.active,
            auth_method: AuthMethod::from_use_ldap(model.use_ldap),
        }
    }
}

/// Columns a guest may supply when registering through the public form.
///
/// Everything else on the row is fixed by [`UserRepository::insert_guest`].
#[derive(Debug, Clone)]
pub struct GuestUser {
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
    pub email: String,
    pub perm_templ: TemplateId,
}

/// Full user row as written by an administrator.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
    pub email: String,
    pub description: String,
    pub perm_templ: TemplateId,
    pub active: bool,
    pub auth_method: AuthMethod,
}

#[derive(Debug, Error)]
pub enum InsertUserError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Failed to insert user: {0}")]
    Database(#[from] DbErr),
}

impl InsertUserError {
    fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::DuplicateUsername,
            _ => Self::Database(err),
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    /// Get user by username together with the stored password hash (for login)
    pub async fn get_by_username_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(|u| {
            let password_hash = u.password.clone();
            (User::from(u), password_hash)
        }))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.conn)
            .await
            .context("Failed to check username uniqueness")?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }

    /// Insert a self-registered account.
    ///
    /// The row is always active, local-credential and tagged with the
    /// public-registration description. A unique-index violation on
    /// `username` is reported as [`InsertUserError::DuplicateUsername`].
    pub async fn insert_guest(&self, guest: GuestUser) -> Result<User, InsertUserError> {
        let active_model = users::ActiveModel {
            username: Set(guest.username),
            password: Set(guest.password_hash),
            fullname: Set(guest.fullname),
            email: Set(guest.email),
            description: Set(GUEST_DESCRIPTION.to_string()),
            perm_templ: Set(guest.perm_templ.value()),
            active: Set(true),
            use_ldap: Set(false),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .map_err(InsertUserError::from_db)?;

        info!(user_id = model.id, "Inserted self-registered user {}", model.username);
        Ok(User::from(model))
    }

    /// Insert a user with every column chosen by the caller.
    ///
    /// Callers must have authorized the acting administrator first.
    pub async fn insert(&self, user: NewUser) -> Result<User, InsertUserError> {
        let active_model = users::ActiveModel {
            username: Set(user.username),
            password: Set(user.password_hash),
            fullname: Set(user.fullname),
            email: Set(user.email),
            description: Set(user.description),
            perm_templ: Set(user.perm_templ.value()),
            active: Set(user.active),
            use_ldap: Set(user.auth_method.uses_ldap()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .map_err(InsertUserError::from_db)?;

        info!(user_id = model.id, "Inserted user {}", model.username);
        Ok(User::from(model))
    }
}
