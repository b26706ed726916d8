//! User models and request DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::RoleId;

/// An active user row, including the stored password hash
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role_id: RoleId,
}

/// A user to be written by the credential store.
///
/// `id: None` inserts a new row; `Some(id)` replaces the row with that id.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub id: Option<i64>,
    pub email: String,
    pub password_hash: String,
    pub role_id: RoleId,
}

impl From<User> for UpsertUser {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            email: user.email,
            password_hash: user.password_hash,
            role_id: user.role_id,
        }
    }
}

/// Public view of a user; never carries the password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub role_id: RoleId,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role_id: user.role_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role_id: Option<RoleId>,
}

/// Partial update; empty or absent fields leave the stored value unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
