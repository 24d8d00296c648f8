//! Device entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use waypost_core::types::{DbId, Timestamp};

use crate::models::location::LocationResponse;

/// A device row from the `devices` table.
#[derive(Debug, Clone, FromRow)]
pub struct Device {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub icon: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Device representation for API responses.
///
/// `latest_location` is only populated by the enriched device listing
/// and omitted from the payload everywhere else.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceResponse {
    #[serde(with = "waypost_core::types::id_string")]
    pub id: DbId,
    #[serde(with = "waypost_core::types::id_string")]
    pub user_id: DbId,
    pub name: String,
    pub icon: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_location: Option<LocationResponse>,
}

impl From<&Device> for DeviceResponse {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id,
            user_id: device.user_id,
            name: device.name.clone(),
            icon: device.icon.clone(),
            created_at: device.created_at,
            updated_at: device.updated_at,
            latest_location: None,
        }
    }
}

/// DTO for creating a new device.
pub struct CreateDevice {
    pub user_id: DbId,
    pub name: String,
    pub icon: Option<String>,
}

/// DTO for updating a device. Only non-`None` fields are applied.
pub struct UpdateDevice {
    pub name: Option<String>,
    pub icon: Option<String>,
}
