//! Repository for the `refresh_tokens` table.

use sqlx::PgPool;
use waypost_core::types::DbId;

use crate::models::refresh_token::{CreateRefreshToken, RefreshToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, token, user_id, agent, created_at, updated_at";

/// Provides CRUD operations for refresh tokens.
pub struct RefreshTokenRepo;

impl RefreshTokenRepo {
    /// Persist a newly issued refresh token, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRefreshToken,
    ) -> Result<RefreshToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_tokens (token, user_id, agent)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(&input.token)
            .bind(input.user_id)
            .bind(&input.agent)
            .fetch_one(pool)
            .await
    }

    /// Find a refresh token row by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RefreshToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM refresh_tokens WHERE id = $1");
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a refresh token row by its token value.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<RefreshToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM refresh_tokens WHERE token = $1");
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List all refresh tokens issued to a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RefreshToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM refresh_tokens
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Stamp `updated_at` to record a successful token exchange.
    pub async fn touch(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE refresh_tokens SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a refresh token row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user's refresh token by token value (logout).
    /// Returns `true` if a row was removed.
    pub async fn delete_by_token(
        pool: &PgPool,
        user_id: DbId,
        token: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1 AND token = $2")
            .bind(user_id)
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
