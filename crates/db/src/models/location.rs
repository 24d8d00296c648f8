//! Location entity model and DTOs.
//!
//! A location belongs to exactly one device; its owner is transitively
//! the device's user. History queries order by `created_at`.

use serde::Serialize;
use sqlx::FromRow;
use waypost_core::types::{DbId, Timestamp};

/// A location row from the `locations` table.
#[derive(Debug, Clone, FromRow)]
pub struct Location {
    pub id: DbId,
    pub device_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    /// Battery percentage in [1, 100], or absent when the reading was
    /// missing or implausible.
    pub battery: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A location row joined with its owning device's user id.
///
/// Used by ownership checks so a single query resolves both the row and
/// who may touch it.
#[derive(Debug, Clone, FromRow)]
pub struct LocationWithOwner {
    #[sqlx(flatten)]
    pub location: Location,
    pub owner_id: DbId,
}

/// Location representation for API responses and realtime pushes.
#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    #[serde(with = "waypost_core::types::id_string")]
    pub id: DbId,
    #[serde(with = "waypost_core::types::id_string")]
    pub device_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    pub battery: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id,
            device_id: location.device_id,
            latitude: location.latitude,
            longitude: location.longitude,
            accuracy: location.accuracy,
            altitude: location.altitude,
            altitude_accuracy: location.altitude_accuracy,
            battery: location.battery,
            created_at: location.created_at,
            updated_at: location.updated_at,
        }
    }
}

/// DTO for recording a new location report.
pub struct CreateLocation {
    pub device_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    pub battery: Option<f64>,
}

/// DTO for correcting an existing location. Only non-`None` fields are
/// applied.
pub struct UpdateLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    pub battery: Option<f64>,
}
