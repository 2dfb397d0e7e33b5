use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use smarthome_api::*;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::errors::ConfigError;
use crate::handles::*;
use crate::repositories::{DeviceRepository, ReadingRepository, SensorRepository};
use crate::services::{CatalogService, ReadingService};

#[derive(OpenApi)]
#[openapi(
    paths(
        get_reading,
        get_readings_from_device,
        get_reading_ids_from_device,
        get_max_difference,
        get_peak_power_consumption
    ),
    components(schemas(
        ReadingResponse,
        ReadingIdResponse,
        ValueResponse,
        PeakPowerResponse,
        SensorKind
    )),
    tags(
        (name = "reading", description = "Reading lookups"),
        (name = "analytics", description = "Reading analytics")
    )
)]
pub struct ApiDoc;

pub async fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let storage = Arc::new(Storage::new(settings.database.clone(), SchemaManager::default()).await?);

    let reading_service = Arc::new(create_reading_service(storage, settings)?);

    Ok(build_router(reading_service))
}

pub fn create_reading_service(
    storage: Arc<Storage>,
    settings: &Settings,
) -> Result<ReadingService, ConfigError> {
    let device_repository = Arc::new(DeviceRepository::new(storage.clone()));
    let sensor_repository = Arc::new(SensorRepository::new(storage.clone()));
    let reading_repository = Arc::new(ReadingRepository::new(storage));

    let catalog_service = Arc::new(CatalogService::new(
        device_repository,
        sensor_repository,
        settings.catalog.clone(),
    ));

    ReadingService::new(catalog_service, reading_repository, &settings.analytics)
}

pub fn build_router(reading_service: Arc<ReadingService>) -> Router {
    Router::new()
        .merge(reading_router(ReadingState { reading_service }))
        .route("/api/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
