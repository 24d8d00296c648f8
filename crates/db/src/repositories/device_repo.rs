//! Repository for the `devices` table.

use sqlx::PgPool;
use waypost_core::types::DbId;

use crate::models::device::{CreateDevice, Device, UpdateDevice};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, icon, created_at, updated_at";

/// Provides CRUD operations for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Insert a new device, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDevice) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices (user_id, name, icon)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    /// Find a device by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a device by name. Device names are unique across all users.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE name = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List a user's devices, oldest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM devices
             WHERE user_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List the ids of a user's devices, optionally narrowed to one
    /// device. Used to resolve the scope of location history queries.
    pub async fn list_ids_for_user(
        pool: &PgPool,
        user_id: DbId,
        device_id: Option<DbId>,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM devices
             WHERE user_id = $1 AND ($2::BIGINT IS NULL OR id = $2)
             ORDER BY id",
        )
        .bind(user_id)
        .bind(device_id)
        .fetch_all(pool)
        .await
    }

    /// Update a device. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDevice,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!(
            "UPDATE devices SET
                name = COALESCE($2, name),
                icon = COALESCE($3, icon),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    /// Delete a device. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
