//! Handlers for the `/devices` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use waypost_core::error::CoreError;
use waypost_core::types::DbId;
use waypost_db::models::device::{CreateDevice, Device, DeviceResponse, UpdateDevice};
use waypost_db::models::location::LocationResponse;
use waypost_db::repositories::{DeviceRepo, LocationRepo};

use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /devices`.
#[derive(Debug, Deserialize)]
pub struct CreateDeviceRequest {
    #[serde(with = "waypost_core::types::id_string")]
    pub user_id: DbId,
    pub name: String,
    pub icon: Option<String>,
}

/// Request body for `PATCH /devices/{id}`. Only the listed fields are
/// mutable; anything else in the payload is rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
}

/// Query parameters for `GET /devices`.
#[derive(Debug, Deserialize)]
pub struct ListDevicesQuery {
    /// When true, enrich each device with its most recent location.
    #[serde(default)]
    pub latest_locations: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/devices
///
/// Register a device for the authenticated user. The owner reference in
/// the payload must match the caller.
pub async fn create_device(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateDeviceRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<DeviceResponse>>)> {
    if input.user_id != auth.user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Device owner must match the authenticated user".into(),
        )));
    }

    if input.name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Device name is required".into(),
        )));
    }

    // Friendly pre-check; the uq_devices_name constraint has the last
    // word under concurrency.
    if DeviceRepo::find_by_name(&state.pool, &input.name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Device name already taken".into(),
        )));
    }

    let create_dto = CreateDevice {
        user_id: auth.user.id,
        name: input.name,
        icon: input.icon,
    };
    let device = DeviceRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(user_id = auth.user.id, device_id = device.id, "Device registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DeviceResponse::from(&device),
        }),
    ))
}

/// GET /api/v1/devices
///
/// List the caller's devices. With `?latest_locations=true` each device
/// carries its newest location, resolved by a single grouped query
/// rather than one lookup per device.
pub async fn list_devices(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListDevicesQuery>,
) -> AppResult<Json<DataResponse<Vec<DeviceResponse>>>> {
    let devices = DeviceRepo::list_for_user(&state.pool, auth.user.id).await?;

    let mut responses: Vec<DeviceResponse> = devices.iter().map(DeviceResponse::from).collect();

    if query.latest_locations {
        let mut latest: HashMap<DbId, LocationResponse> =
            LocationRepo::latest_per_device(&state.pool, auth.user.id)
                .await?
                .iter()
                .map(|location| (location.device_id, LocationResponse::from(location)))
                .collect();

        for response in &mut responses {
            response.latest_location = latest.remove(&response.id);
        }
    }

    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/v1/devices/{id}
pub async fn get_device(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeviceResponse>>> {
    let device = find_owned_device(&state, &auth, id).await?;

    Ok(Json(DataResponse {
        data: DeviceResponse::from(&device),
    }))
}

/// PATCH /api/v1/devices/{id}
///
/// Rename a device or change its icon.
pub async fn update_device(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateDeviceRequest>,
) -> AppResult<Json<DataResponse<DeviceResponse>>> {
    let device = find_owned_device(&state, &auth, id).await?;

    if let Some(name) = &input.name {
        if name.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Device name is required".into(),
            )));
        }
        if *name != device.name
            && DeviceRepo::find_by_name(&state.pool, name).await?.is_some()
        {
            return Err(AppError::Core(CoreError::Conflict(
                "Device name already taken".into(),
            )));
        }
    }

    let update_dto = UpdateDevice {
        name: input.name,
        icon: input.icon,
    };
    let updated = DeviceRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id,
        }))?;

    tracing::info!(user_id = auth.user.id, device_id = id, "Device updated");

    Ok(Json(DataResponse {
        data: DeviceResponse::from(&updated),
    }))
}

/// DELETE /api/v1/devices/{id}
///
/// Delete a device and, through the schema, its location history.
pub async fn delete_device(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned_device(&state, &auth, id).await?;

    let removed = DeviceRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id,
        }));
    }

    tracing::info!(user_id = auth.user.id, device_id = id, "Device deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a device and apply the ownership policy: 404 when absent, 403
/// when owned by another user.
async fn find_owned_device(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Device> {
    let device = DeviceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id,
        }))?;

    if device.user_id != auth.user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Device belongs to another user".into(),
        )));
    }

    Ok(device)
}
