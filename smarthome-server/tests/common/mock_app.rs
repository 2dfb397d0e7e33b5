use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use smarthome_server::app::{build_router, create_reading_service};
use smarthome_server::configs::{Settings, Storage};
use smarthome_server::models::{Device, Sensor};
use smarthome_server::tests::*;
use time::OffsetDateTime;
use tower::ServiceExt;

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub settings: Settings,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = setup_test_db().await;
        let settings = test_settings();

        let reading_service = Arc::new(create_reading_service(storage.clone(), &settings).unwrap());

        Self {
            storage,
            settings,
            router: build_router(reading_service),
        }
    }

    pub async fn create_grid_meter(&self, name: &str) -> (Device, Sensor) {
        let device_type = self.settings.catalog.grid_meter_type.clone();
        self.create_power_meter(name, &device_type).await
    }

    pub async fn create_source_meter(&self, name: &str) -> (Device, Sensor) {
        let device_type = self.settings.catalog.power_source_meter_type.clone();
        self.create_power_meter(name, &device_type).await
    }

    pub async fn create_thermometer(&self, name: &str) -> (Device, Sensor) {
        let device = create_test_device(self.storage.clone(), name, "Thermostat").await;
        let sensor = create_test_sensor(
            self.storage.clone(),
            device.id,
            &format!("{name} Temperature"),
            &self.settings.catalog.temperature_model,
        )
        .await;

        (device, sensor)
    }

    pub async fn record(&self, sensor: &Sensor, value: f64, time: OffsetDateTime) -> i32 {
        create_test_reading(self.storage.clone(), sensor.id, value, time)
            .await
            .id
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

        (status, json)
    }

    async fn create_power_meter(&self, name: &str, device_type: &str) -> (Device, Sensor) {
        let device = create_test_device(self.storage.clone(), name, device_type).await;
        let sensor = create_test_sensor(
            self.storage.clone(),
            device.id,
            &format!("{name} Power"),
            &self.settings.catalog.power_consumption_model,
        )
        .await;

        (device, sensor)
    }
}
