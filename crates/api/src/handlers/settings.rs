//! Handlers for the `/settings` resource.
//!
//! Settings are global key-value rows: any authenticated user may read
//! them, only admins may write.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use waypost_core::error::CoreError;
use waypost_core::types::DbId;
use waypost_db::models::setting::{CreateSetting, SettingResponse};
use waypost_db::repositories::SettingRepo;

use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /settings`.
#[derive(Debug, Deserialize)]
pub struct CreateSettingRequest {
    pub key: String,
    pub value: String,
}

/// Request body for `PATCH /settings/{id}`. The key is immutable; only
/// the value can change.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSettingRequest {
    pub value: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/settings (admin only)
pub async fn create_setting(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateSettingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SettingResponse>>)> {
    if input.key.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Setting key is required".into(),
        )));
    }

    if SettingRepo::find_by_key(&state.pool, &input.key)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Setting already exists".into(),
        )));
    }

    let create_dto = CreateSetting {
        key: input.key,
        value: input.value,
    };
    let setting = SettingRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(admin_id = admin.id, key = %setting.key, "Setting created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SettingResponse::from(&setting),
        }),
    ))
}

/// GET /api/v1/settings
pub async fn list_settings(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SettingResponse>>>> {
    let settings = SettingRepo::list(&state.pool).await?;
    let responses: Vec<SettingResponse> = settings.iter().map(SettingResponse::from).collect();

    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/v1/settings/{id}
pub async fn get_setting(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SettingResponse>>> {
    let setting = SettingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Setting",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: SettingResponse::from(&setting),
    }))
}

/// PATCH /api/v1/settings/{id} (admin only)
pub async fn update_setting(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateSettingRequest>,
) -> AppResult<Json<DataResponse<SettingResponse>>> {
    let updated = SettingRepo::update_value(&state.pool, id, &input.value)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Setting",
            id,
        }))?;

    tracing::info!(admin_id = admin.id, key = %updated.key, "Setting updated");

    Ok(Json(DataResponse {
        data: SettingResponse::from(&updated),
    }))
}

/// DELETE /api/v1/settings/{id} (admin only)
pub async fn delete_setting(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = SettingRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Setting",
            id,
        }));
    }

    tracing::info!(admin_id = admin.id, setting_id = id, "Setting deleted");

    Ok(StatusCode::NO_CONTENT)
}
