//! Refresh token model and DTOs.
//!
//! One row per issued refresh token; deleting the row revokes that
//! session. `updated_at` records the last successful exchange.

use serde::Serialize;
use sqlx::FromRow;
use waypost_core::types::{DbId, Timestamp};

/// A refresh token row from the `refresh_tokens` table.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: DbId,
    pub token: String,
    pub user_id: DbId,
    /// `User-Agent` string of the client the session was issued to.
    pub agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Refresh token representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenResponse {
    #[serde(with = "waypost_core::types::id_string")]
    pub id: DbId,
    pub token: String,
    #[serde(with = "waypost_core::types::id_string")]
    pub user_id: DbId,
    pub agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&RefreshToken> for RefreshTokenResponse {
    fn from(token: &RefreshToken) -> Self {
        Self {
            id: token.id,
            token: token.token.clone(),
            user_id: token.user_id,
            agent: token.agent.clone(),
            created_at: token.created_at,
            updated_at: token.updated_at,
        }
    }
}

/// DTO for persisting a newly issued refresh token.
pub struct CreateRefreshToken {
    pub token: String,
    pub user_id: DbId,
    pub agent: Option<String>,
}
