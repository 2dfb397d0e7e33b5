use async_trait::async_trait;
use smarthome_api::{DeviceCategory, Id, SensorKind};
use time::OffsetDateTime;

use super::TimedValue;
use crate::errors::SourceError;
use crate::models::Reading;

/// Read-only view of the device and sensor catalog.
///
/// Lookups that match nothing return an empty list, not an error.
#[async_trait]
pub trait SensorCatalog: Send + Sync {
    /// Sensors of the given kind attached to a device.
    async fn resolve_sensors(&self, device_id: Id, kind: SensorKind) -> Result<Vec<Id>, SourceError>;

    async fn devices_of_category(&self, category: DeviceCategory) -> Result<Vec<Id>, SourceError>;

    /// Every sensor attached to a device, whatever its kind.
    async fn sensors_of_device(&self, device_id: Id) -> Result<Vec<Id>, SourceError>;
}

/// Read-only view of recorded readings.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Readings of a sensor with `start <= time <= end`, in no particular order.
    async fn records_in_period(
        &self,
        sensor_id: Id,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<Vec<Reading>, SourceError>;

    async fn find_reading(&self, id: Id) -> Result<Option<Reading>, SourceError>;

    async fn readings_in_period(
        &self,
        sensor_id: Id,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<Vec<TimedValue>, SourceError> {
        let records = self.records_in_period(sensor_id, start, end).await?;

        Ok(records.into_iter().map(TimedValue::from).collect())
    }
}
