//! Handlers for the `/locations` resource.
//!
//! Locations are owned transitively through their device, so every
//! single-row operation resolves the owning user with one joined query.
//! Creating a location also pushes a `locationsUpdate` event to the
//! owner's user group before the HTTP response is returned.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use waypost_core::battery::sanitize_battery;
use waypost_core::error::CoreError;
use waypost_core::types::{DbId, Timestamp};
use waypost_db::models::location::{
    CreateLocation, LocationResponse, LocationWithOwner, UpdateLocation,
};
use waypost_db::repositories::location_repo::DateRange;
use waypost_db::repositories::{DeviceRepo, LocationRepo};

use crate::error::{AppError, AppJson, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::ws::events::ServerEvent;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /locations`.
#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    #[serde(with = "waypost_core::types::id_string")]
    pub device_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    pub battery: Option<f64>,
}

/// Request body for `PATCH /locations/{id}`. Only the listed fields are
/// mutable; anything else in the payload is rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateLocationRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    pub battery: Option<f64>,
}

/// Query parameters for `GET /locations`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Narrow the history to one device; defaults to all of the
    /// caller's devices.
    pub device_id: Option<DbId>,
    /// Inclusive lower bound on `created_at` (RFC 3339).
    pub start_date: Option<Timestamp>,
    /// Inclusive upper bound on `created_at` (RFC 3339).
    pub end_date: Option<Timestamp>,
    /// When true, return only the newest location per device.
    #[serde(default)]
    pub latest: bool,
}

/// Query parameters for `GET /locations/dates`.
#[derive(Debug, Deserialize)]
pub struct AvailableDatesQuery {
    pub device_id: Option<DbId>,
}

/// One history bucket: a device and its locations in range.
#[derive(Debug, Serialize)]
pub struct LocationBucket {
    #[serde(with = "waypost_core::types::id_string")]
    pub device_id: DbId,
    pub locations: Vec<LocationResponse>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/locations
///
/// Record a location report for one of the caller's devices and fan it
/// out to the owner's connected clients.
pub async fn create_location(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateLocationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LocationResponse>>)> {
    let device = DeviceRepo::find_by_id(&state.pool, input.device_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id: input.device_id,
        }))?;

    if device.user_id != auth.user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Device belongs to another user".into(),
        )));
    }

    let create_dto = CreateLocation {
        device_id: input.device_id,
        latitude: input.latitude,
        longitude: input.longitude,
        accuracy: input.accuracy,
        altitude: input.altitude,
        altitude_accuracy: input.altitude_accuracy,
        battery: sanitize_battery(input.battery),
    };
    let location = LocationRepo::create(&state.pool, &create_dto).await?;

    let response = LocationResponse::from(&location);

    // Push to the owner's user group before responding; delivery is
    // at-most-once with no replay for offline clients.
    state
        .ws_manager
        .send_to_user(
            auth.user.id,
            ServerEvent::LocationsUpdate(response.clone()).to_message(),
        )
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/locations
///
/// Location history grouped by device. Scope is the caller's devices,
/// optionally narrowed by `device_id` and an inclusive date range;
/// `latest=true` collapses each bucket to its newest row.
pub async fn list_locations(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<LocationBucket>>>> {
    let device_ids =
        DeviceRepo::list_ids_for_user(&state.pool, auth.user.id, query.device_id).await?;

    if device_ids.is_empty() {
        return Err(AppError::NotFound("No matching devices found".into()));
    }

    let range = DateRange {
        start: query.start_date,
        end: query.end_date,
    };

    let mut buckets = Vec::with_capacity(device_ids.len());
    for device_id in device_ids {
        let locations = if query.latest {
            LocationRepo::latest_for_device(&state.pool, device_id, range)
                .await?
                .into_iter()
                .collect()
        } else {
            LocationRepo::list_for_device(&state.pool, device_id, range).await?
        };

        buckets.push(LocationBucket {
            device_id,
            locations: locations.iter().map(LocationResponse::from).collect(),
        });
    }

    Ok(Json(DataResponse { data: buckets }))
}

/// GET /api/v1/locations/dates
///
/// Distinct UTC calendar dates on which a device reported locations,
/// sorted ascending.
pub async fn available_dates(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AvailableDatesQuery>,
) -> AppResult<Json<DataResponse<Vec<NaiveDate>>>> {
    let device_id = query
        .device_id
        .ok_or_else(|| AppError::BadRequest("A device id is required".into()))?;

    let device = DeviceRepo::find_by_id(&state.pool, device_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id: device_id,
        }))?;

    if device.user_id != auth.user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Device belongs to another user".into(),
        )));
    }

    let dates = LocationRepo::distinct_dates(&state.pool, device_id).await?;

    Ok(Json(DataResponse { data: dates }))
}

/// GET /api/v1/locations/{id}
pub async fn get_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LocationResponse>>> {
    let row = find_owned_location(&state, &auth, id).await?;

    Ok(Json(DataResponse {
        data: LocationResponse::from(&row.location),
    }))
}

/// PATCH /api/v1/locations/{id}
///
/// Correct an existing location report.
pub async fn update_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateLocationRequest>,
) -> AppResult<Json<DataResponse<LocationResponse>>> {
    find_owned_location(&state, &auth, id).await?;

    let update_dto = UpdateLocation {
        latitude: input.latitude,
        longitude: input.longitude,
        accuracy: input.accuracy,
        altitude: input.altitude,
        altitude_accuracy: input.altitude_accuracy,
        battery: sanitize_battery(input.battery),
    };
    let updated = LocationRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;

    tracing::info!(user_id = auth.user.id, location_id = id, "Location updated");

    Ok(Json(DataResponse {
        data: LocationResponse::from(&updated),
    }))
}

/// DELETE /api/v1/locations/{id}
pub async fn delete_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned_location(&state, &auth, id).await?;

    let removed = LocationRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }));
    }

    tracing::info!(user_id = auth.user.id, location_id = id, "Location deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a location with its owner and apply the ownership policy: 404
/// when absent, 403 when the owning device belongs to another user.
async fn find_owned_location(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<LocationWithOwner> {
    let row = LocationRepo::find_by_id_with_owner(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;

    if row.owner_id != auth.user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Location belongs to another user".into(),
        )));
    }

    Ok(row)
}
