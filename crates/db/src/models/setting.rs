//! Global setting model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use waypost_core::types::{DbId, Timestamp};

/// A setting row from the `settings` table. Keys are unique; writes are
/// admin-gated at the API layer.
#[derive(Debug, Clone, FromRow)]
pub struct Setting {
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Setting representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SettingResponse {
    #[serde(with = "waypost_core::types::id_string")]
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Setting> for SettingResponse {
    fn from(setting: &Setting) -> Self {
        Self {
            id: setting.id,
            key: setting.key.clone(),
            value: setting.value.clone(),
            created_at: setting.created_at,
            updated_at: setting.updated_at,
        }
    }
}

/// DTO for creating a setting.
pub struct CreateSetting {
    pub key: String,
    pub value: String,
}
