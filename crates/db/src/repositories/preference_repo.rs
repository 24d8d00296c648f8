//! Repository for the `preferences` table.

use sqlx::PgPool;
use waypost_core::types::DbId;

use crate::models::preference::{CreatePreference, Preference};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, key, value, created_at, updated_at";

/// Provides CRUD operations for user preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Insert a new preference, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePreference,
    ) -> Result<Preference, sqlx::Error> {
        let query = format!(
            "INSERT INTO preferences (user_id, key, value)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Preference>(&query)
            .bind(input.user_id)
            .bind(&input.key)
            .bind(&input.value)
            .fetch_one(pool)
            .await
    }

    /// Find a preference by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Preference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM preferences WHERE id = $1");
        sqlx::query_as::<_, Preference>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user's preference by key. `(user_id, key)` is unique.
    pub async fn find_by_key(
        pool: &PgPool,
        user_id: DbId,
        key: &str,
    ) -> Result<Option<Preference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM preferences WHERE user_id = $1 AND key = $2");
        sqlx::query_as::<_, Preference>(&query)
            .bind(user_id)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// List all of a user's preferences, ordered by key.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Preference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM preferences
             WHERE user_id = $1
             ORDER BY key ASC"
        );
        sqlx::query_as::<_, Preference>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a preference's value.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_value(
        pool: &PgPool,
        id: DbId,
        value: &str,
    ) -> Result<Option<Preference>, sqlx::Error> {
        let query = format!(
            "UPDATE preferences SET value = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Preference>(&query)
            .bind(id)
            .bind(value)
            .fetch_optional(pool)
            .await
    }

    /// Delete a preference. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM preferences WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
