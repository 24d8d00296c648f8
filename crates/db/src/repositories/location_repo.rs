//! Repository for the `locations` table.
//!
//! History queries are parameterized by an optional inclusive date range;
//! the range is bound as nullable timestamps so a single SQL shape covers
//! every combination of bounds.

use chrono::NaiveDate;
use sqlx::PgPool;
use waypost_core::types::{DbId, Timestamp};

use crate::models::location::{CreateLocation, Location, LocationWithOwner, UpdateLocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, device_id, latitude, longitude, accuracy, altitude, \
                       altitude_accuracy, battery, created_at, updated_at";

/// Inclusive `created_at` range filter for history queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

/// Provides CRUD and history operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location report, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations
                (device_id, latitude, longitude, accuracy, altitude, altitude_accuracy, battery)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(input.device_id)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.accuracy)
            .bind(input.altitude)
            .bind(input.altitude_accuracy)
            .bind(input.battery)
            .fetch_one(pool)
            .await
    }

    /// Find a location joined with its owning device's user id.
    pub async fn find_by_id_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LocationWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT l.{}, d.user_id AS owner_id
             FROM locations l
             JOIN devices d ON d.id = l.device_id
             WHERE l.id = $1",
            COLUMNS.replace(", ", ", l.")
        );
        sqlx::query_as::<_, LocationWithOwner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a device's locations within the range, oldest first.
    pub async fn list_for_device(
        pool: &PgPool,
        device_id: DbId,
        range: DateRange,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE device_id = $1
               AND ($2::TIMESTAMPTZ IS NULL OR created_at >= $2)
               AND ($3::TIMESTAMPTZ IS NULL OR created_at <= $3)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(device_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(pool)
            .await
    }

    /// Newest location of a device within the range, if any.
    pub async fn latest_for_device(
        pool: &PgPool,
        device_id: DbId,
        range: DateRange,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE device_id = $1
               AND ($2::TIMESTAMPTZ IS NULL OR created_at >= $2)
               AND ($3::TIMESTAMPTZ IS NULL OR created_at <= $3)
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(device_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_optional(pool)
            .await
    }

    /// Newest location per device for every device owned by `user_id`,
    /// in a single grouped query.
    pub async fn latest_per_device(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (l.device_id) l.{}
             FROM locations l
             JOIN devices d ON d.id = l.device_id
             WHERE d.user_id = $1
             ORDER BY l.device_id, l.created_at DESC, l.id DESC",
            COLUMNS.replace(", ", ", l.")
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Distinct UTC calendar dates on which a device reported locations,
    /// ascending.
    pub async fn distinct_dates(
        pool: &PgPool,
        device_id: DbId,
    ) -> Result<Vec<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT DISTINCT (created_at AT TIME ZONE 'UTC')::DATE AS day
             FROM locations
             WHERE device_id = $1
             ORDER BY day ASC",
        )
        .bind(device_id)
        .fetch_all(pool)
        .await
    }

    /// Update a location. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                latitude = COALESCE($2, latitude),
                longitude = COALESCE($3, longitude),
                accuracy = COALESCE($4, accuracy),
                altitude = COALESCE($5, altitude),
                altitude_accuracy = COALESCE($6, altitude_accuracy),
                battery = COALESCE($7, battery),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.accuracy)
            .bind(input.altitude)
            .bind(input.altitude_accuracy)
            .bind(input.battery)
            .fetch_optional(pool)
            .await
    }

    /// Delete a location. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
