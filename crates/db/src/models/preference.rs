//! User preference model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use waypost_core::types::{DbId, Timestamp};

/// A preference row from the `preferences` table. `(user_id, key)` is
/// unique.
#[derive(Debug, Clone, FromRow)]
pub struct Preference {
    pub id: DbId,
    pub user_id: DbId,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Preference representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceResponse {
    #[serde(with = "waypost_core::types::id_string")]
    pub id: DbId,
    #[serde(with = "waypost_core::types::id_string")]
    pub user_id: DbId,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Preference> for PreferenceResponse {
    fn from(preference: &Preference) -> Self {
        Self {
            id: preference.id,
            user_id: preference.user_id,
            key: preference.key.clone(),
            value: preference.value.clone(),
            created_at: preference.created_at,
            updated_at: preference.updated_at,
        }
    }
}

/// DTO for creating a preference.
pub struct CreatePreference {
    pub user_id: DbId,
    pub key: String,
    pub value: String,
}
