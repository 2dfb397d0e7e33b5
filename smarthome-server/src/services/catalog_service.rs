use std::sync::Arc;

use async_trait::async_trait;
use smarthome_api::{DeviceCategory, Id, SensorKind};

use crate::configs::Catalog;
use crate::errors::SourceError;
use crate::repositories::{DeviceRepository, SensorRepository};
use crate::services::analytics::SensorCatalog;

/// Resolves sensor kinds and device categories against the persisted catalog.
pub struct CatalogService {
    device_repository: Arc<DeviceRepository>,
    sensor_repository: Arc<SensorRepository>,
    catalog: Catalog,
}

impl CatalogService {
    pub fn new(
        device_repository: Arc<DeviceRepository>,
        sensor_repository: Arc<SensorRepository>,
        catalog: Catalog,
    ) -> Self {
        Self {
            device_repository,
            sensor_repository,
            catalog,
        }
    }
}

#[async_trait]
impl SensorCatalog for CatalogService {
    async fn resolve_sensors(&self, device_id: Id, kind: SensorKind) -> Result<Vec<Id>, SourceError> {
        let model_name = self.catalog.model_name(kind);

        Ok(self
            .sensor_repository
            .find_ids_by_device_id_and_model(device_id, model_name)
            .await?)
    }

    async fn devices_of_category(&self, category: DeviceCategory) -> Result<Vec<Id>, SourceError> {
        let device_type = self.catalog.device_type(category);

        Ok(self.device_repository.find_ids_by_type(device_type).await?)
    }

    async fn sensors_of_device(&self, device_id: Id) -> Result<Vec<Id>, SourceError> {
        let sensors = self.sensor_repository.find_by_device_id(device_id).await?;

        Ok(sensors.into_iter().map(|sensor| sensor.id).collect())
    }
}
