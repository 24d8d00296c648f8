//! Repository for the `settings` table.

use sqlx::PgPool;
use waypost_core::types::DbId;

use crate::models::setting::{CreateSetting, Setting};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, value, created_at, updated_at";

/// Provides CRUD operations for global settings.
pub struct SettingRepo;

impl SettingRepo {
    /// Insert a new setting, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSetting) -> Result<Setting, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (key, value)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(&input.key)
            .bind(&input.value)
            .fetch_one(pool)
            .await
    }

    /// Find a setting by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE id = $1");
        sqlx::query_as::<_, Setting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a setting by its unique key.
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE key = $1");
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// List all settings, ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings ORDER BY key ASC");
        sqlx::query_as::<_, Setting>(&query).fetch_all(pool).await
    }

    /// Replace a setting's value.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_value(
        pool: &PgPool,
        id: DbId,
        value: &str,
    ) -> Result<Option<Setting>, sqlx::Error> {
        let query = format!(
            "UPDATE settings SET value = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(id)
            .bind(value)
            .fetch_optional(pool)
            .await
    }

    /// Delete a setting. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM settings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
