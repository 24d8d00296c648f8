//! Handlers for the `/preferences` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use waypost_core::error::CoreError;
use waypost_core::types::DbId;
use waypost_db::models::preference::{CreatePreference, Preference, PreferenceResponse};
use waypost_db::repositories::PreferenceRepo;

use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /preferences`.
#[derive(Debug, Deserialize)]
pub struct CreatePreferenceRequest {
    #[serde(with = "waypost_core::types::id_string")]
    pub user_id: DbId,
    pub key: String,
    pub value: String,
}

/// Request body for `PATCH /preferences/{id}`. The key is immutable;
/// only the value can change.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePreferenceRequest {
    pub value: String,
}

/// Query parameters for `GET /preferences`.
#[derive(Debug, Deserialize)]
pub struct ListPreferencesQuery {
    pub key: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/preferences
///
/// Store a preference for the authenticated user. `(user, key)` is
/// unique.
pub async fn create_preference(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreatePreferenceRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PreferenceResponse>>)> {
    if input.user_id != auth.user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Preference owner must match the authenticated user".into(),
        )));
    }

    if input.key.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Preference key is required".into(),
        )));
    }

    if PreferenceRepo::find_by_key(&state.pool, auth.user.id, &input.key)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Preference already exists".into(),
        )));
    }

    let create_dto = CreatePreference {
        user_id: auth.user.id,
        key: input.key,
        value: input.value,
    };
    let preference = PreferenceRepo::create(&state.pool, &create_dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PreferenceResponse::from(&preference),
        }),
    ))
}

/// GET /api/v1/preferences
///
/// List the caller's preferences, or with `?key=` fetch the single
/// preference stored under that key (404 when absent).
pub async fn list_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListPreferencesQuery>,
) -> AppResult<axum::response::Response> {
    match query.key {
        Some(key) => {
            let preference = PreferenceRepo::find_by_key(&state.pool, auth.user.id, &key)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("No preference with key {key}")))?;

            Ok(Json(DataResponse {
                data: PreferenceResponse::from(&preference),
            })
            .into_response())
        }
        None => {
            let preferences = PreferenceRepo::list_for_user(&state.pool, auth.user.id).await?;
            let responses: Vec<PreferenceResponse> =
                preferences.iter().map(PreferenceResponse::from).collect();

            Ok(Json(DataResponse { data: responses }).into_response())
        }
    }
}

/// GET /api/v1/preferences/{id}
pub async fn get_preference(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PreferenceResponse>>> {
    let preference = find_owned_preference(&state, &auth, id).await?;

    Ok(Json(DataResponse {
        data: PreferenceResponse::from(&preference),
    }))
}

/// PATCH /api/v1/preferences/{id}
pub async fn update_preference(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdatePreferenceRequest>,
) -> AppResult<Json<DataResponse<PreferenceResponse>>> {
    find_owned_preference(&state, &auth, id).await?;

    let updated = PreferenceRepo::update_value(&state.pool, id, &input.value)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Preference",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: PreferenceResponse::from(&updated),
    }))
}

/// DELETE /api/v1/preferences/{id}
pub async fn delete_preference(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned_preference(&state, &auth, id).await?;

    let removed = PreferenceRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Preference",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a preference and apply the ownership policy: 404 when absent,
/// 403 when owned by another user.
async fn find_owned_preference(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<Preference> {
    let preference = PreferenceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Preference",
            id,
        }))?;

    if preference.user_id != auth.user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Preference belongs to another user".into(),
        )));
    }

    Ok(preference)
}
