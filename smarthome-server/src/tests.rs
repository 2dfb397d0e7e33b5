use std::sync::Arc;

use time::OffsetDateTime;

use crate::configs::{Database, SchemaManager, Settings, Storage};
use crate::models::{Device, Reading, Sensor};
use crate::repositories::{DeviceRepository, ReadingRepository, SensorRepository};

pub async fn setup_test_db() -> Arc<Storage> {
    Arc::new(
        Storage::new(
            Database {
                migration_path: None,
                clean_start: true,
                url: String::from("sqlite::memory:"),
            },
            SchemaManager::default(),
        )
        .await
        .unwrap(),
    )
}

/// Embedded defaults with one-minute tolerance and aggregation windows.
pub fn test_settings() -> Settings {
    let mut settings = Settings::defaults().unwrap();
    settings.analytics.tolerance_seconds = 60;
    settings.analytics.aggregation_window_seconds = 60;
    settings
}

pub async fn create_test_device(storage: Arc<Storage>, name: &str, device_type: &str) -> Device {
    let repository = DeviceRepository::new(storage.clone());
    let device = Device {
        id: 0,
        name: name.to_string(),
        device_type: device_type.to_string(),
    };

    let mut tx = storage.get_pool().begin().await.unwrap();
    let id = repository.create(&device, &mut tx).await.unwrap();
    tx.commit().await.unwrap();

    repository.find_by_id(id).await.unwrap().unwrap()
}

pub async fn create_test_sensor(
    storage: Arc<Storage>,
    device_id: i32,
    name: &str,
    model_name: &str,
) -> Sensor {
    let repository = SensorRepository::new(storage.clone());
    let sensor = Sensor {
        id: 0,
        device_id,
        name: name.to_string(),
        model_name: model_name.to_string(),
    };

    let mut tx = storage.get_pool().begin().await.unwrap();
    let id = repository.create(&sensor, &mut tx).await.unwrap();
    tx.commit().await.unwrap();

    repository.find_by_id(id).await.unwrap().unwrap()
}

pub async fn create_test_reading(
    storage: Arc<Storage>,
    sensor_id: i32,
    value: f64,
    time: OffsetDateTime,
) -> Reading {
    let repository = ReadingRepository::new(storage.clone());
    let reading = Reading {
        id: 0,
        sensor_id,
        value,
        time,
    };

    let mut tx = storage.get_pool().begin().await.unwrap();
    let id = repository.create(&reading, &mut tx).await.unwrap();
    tx.commit().await.unwrap();

    repository.find_by_id(id).await.unwrap().unwrap()
}
