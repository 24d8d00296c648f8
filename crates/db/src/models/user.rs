//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use waypost_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    #[serde(with = "waypost_core::types::id_string")]
    pub id: DbId,
    pub username: String,
    pub admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            admin: user.admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user.
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub admin: bool,
}

/// DTO for updating an existing user. Only non-`None` fields are applied.
pub struct UpdateUser {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub admin: Option<bool>,
}
