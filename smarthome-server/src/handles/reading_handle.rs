use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use smarthome_api::*;
use time::OffsetDateTime;

use crate::errors::{ApiError, ReadingError};
use crate::services::ReadingService;
use crate::services::analytics::Period;

#[derive(Clone)]
pub struct ReadingState {
    pub reading_service: Arc<ReadingService>,
}

pub fn reading_router(reading_state: ReadingState) -> Router {
    Router::new()
        .route("/api/readings/:reading_id", get(get_reading))
        .route(
            "/api/devices/:device_id/readings",
            get(get_readings_from_device),
        )
        .route(
            "/api/devices/:device_id/reading-ids",
            get(get_reading_ids_from_device),
        )
        .route(
            "/api/devices/:device_id/max-difference/:other_device_id",
            get(get_max_difference),
        )
        .route("/api/power/peak", get(get_peak_power_consumption))
        .with_state(reading_state)
}

fn valid_period(
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
) -> Result<Period, ReadingError> {
    Period::from_bounds(start, end)
        .filter(|period| period.is_valid(OffsetDateTime::now_utc()))
        .ok_or(ReadingError::InvalidPeriod)
}

#[utoipa::path(
    get,
    path = "/api/readings/{reading_id}",
    tag = "reading",
    params(
        ("reading_id" = i32, Path, description = "Reading ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved reading", body = ReadingResponse),
        (status = 404, description = "Reading not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_reading(
    State(state): State<ReadingState>,
    Path(reading_id): Path<i32>,
) -> Result<Json<ReadingResponse>, ApiError> {
    let reading = state
        .reading_service
        .get_reading(reading_id)
        .await
        .ok_or(ReadingError::ReadingNotFound)?;

    Ok(Json(reading.into()))
}

#[utoipa::path(
    get,
    path = "/api/devices/{device_id}/readings",
    tag = "reading",
    params(
        ("device_id" = i32, Path, description = "Device ID"),
        ("start" = String, Query, description = "Period start, RFC 3339"),
        ("end" = String, Query, description = "Period end, RFC 3339")
    ),
    responses(
        (status = 200, description = "Readings of every sensor of the device", body = Vec<ReadingResponse>),
        (status = 400, description = "Invalid or incomplete period"),
        (status = 404, description = "No readings in the period"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_readings_from_device(
    State(state): State<ReadingState>,
    Path(device_id): Path<i32>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<ReadingResponse>>, ApiError> {
    let period = valid_period(query.start, query.end)?;

    let readings = state
        .reading_service
        .readings_from_device(device_id, &period)
        .await
        .ok_or_else(|| anyhow!("Readings of device {} unavailable", device_id))?;

    if readings.is_empty() {
        return Err(ReadingError::NoReadings.into());
    }

    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/devices/{device_id}/reading-ids",
    tag = "reading",
    params(
        ("device_id" = i32, Path, description = "Device ID"),
        ("start" = String, Query, description = "Period start, RFC 3339"),
        ("end" = String, Query, description = "Period end, RFC 3339")
    ),
    responses(
        (status = 200, description = "Reading IDs of every sensor of the device", body = Vec<ReadingIdResponse>),
        (status = 400, description = "Invalid or incomplete period"),
        (status = 404, description = "No readings in the period"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_reading_ids_from_device(
    State(state): State<ReadingState>,
    Path(device_id): Path<i32>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<ReadingIdResponse>>, ApiError> {
    let period = valid_period(query.start, query.end)?;

    let ids = state
        .reading_service
        .reading_ids_from_device(device_id, &period)
        .await
        .ok_or_else(|| anyhow!("Reading IDs of device {} unavailable", device_id))?;

    if ids.is_empty() {
        return Err(ReadingError::NoReadings.into());
    }

    Ok(Json(
        ids.into_iter().map(|id| ReadingIdResponse { id }).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/devices/{device_id}/max-difference/{other_device_id}",
    tag = "analytics",
    params(
        ("device_id" = i32, Path, description = "First device ID"),
        ("other_device_id" = i32, Path, description = "Second device ID"),
        ("start" = String, Query, description = "Period start, RFC 3339"),
        ("end" = String, Query, description = "Period end, RFC 3339"),
        ("kind" = Option<SensorKind>, Query, description = "Sensor kind, temperature by default")
    ),
    responses(
        (status = 200, description = "Largest difference between near-simultaneous readings", body = ValueResponse),
        (status = 400, description = "Invalid or incomplete period"),
        (status = 404, description = "No comparable readings"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_max_difference(
    State(state): State<ReadingState>,
    Path((device_id, other_device_id)): Path<(i32, i32)>,
    Query(query): Query<DifferenceQuery>,
) -> Result<Json<ValueResponse>, ApiError> {
    let period = valid_period(query.start, query.end)?;

    let value = state
        .reading_service
        .max_instant_difference(device_id, other_device_id, query.kind, &period)
        .await
        .ok_or(ReadingError::NoResult)?;

    Ok(Json(ValueResponse { value }))
}

#[utoipa::path(
    get,
    path = "/api/power/peak",
    tag = "analytics",
    params(
        ("start" = String, Query, description = "Period start, RFC 3339"),
        ("end" = String, Query, description = "Period end, RFC 3339")
    ),
    responses(
        (status = 200, description = "Peak net power consumption and its window", body = PeakPowerResponse),
        (status = 400, description = "Invalid or incomplete period"),
        (status = 404, description = "No power readings in the period"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_peak_power_consumption(
    State(state): State<ReadingState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<PeakPowerResponse>, ApiError> {
    let period = valid_period(query.start, query.end)?;

    let peak = state
        .reading_service
        .peak_net_power_window(&period)
        .await
        .ok_or(ReadingError::NoResult)?;

    Ok(Json(PeakPowerResponse {
        value: peak.value,
        window_start: peak.window.start,
        window_end: peak.window.end,
    }))
}
