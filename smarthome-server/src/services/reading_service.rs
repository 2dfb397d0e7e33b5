use std::sync::Arc;

use smarthome_api::{DeviceCategory, Id, SensorKind};
use time::{Duration, OffsetDateTime};

use crate::configs::Analytics;
use crate::errors::{ConfigError, SourceError};
use crate::models::Reading;
use crate::services::analytics::{
    self, NetPowerPeak, Period, ReadingSource, SensorCatalog, TimedValue,
};

/// Reading lookups and analytics over the sensor catalog and reading source.
///
/// Every operation is a read-only snapshot of its collaborators. Invalid
/// periods, missing data and collaborator failures all end up as `None`.
#[derive(Clone)]
pub struct ReadingService {
    catalog: Arc<dyn SensorCatalog>,
    source: Arc<dyn ReadingSource>,
    tolerance: Duration,
    aggregation_window: Duration,
}

impl ReadingService {
    pub fn new(
        catalog: Arc<dyn SensorCatalog>,
        source: Arc<dyn ReadingSource>,
        analytics: &Analytics,
    ) -> Result<Self, ConfigError> {
        analytics.validate()?;

        Ok(Self {
            catalog,
            source,
            tolerance: analytics.tolerance(),
            aggregation_window: analytics.aggregation_window(),
        })
    }

    /// Largest difference between same-kind readings of two devices taken
    /// within the tolerance window of each other.
    pub async fn max_instant_difference(
        &self,
        device_a: Id,
        device_b: Id,
        kind: SensorKind,
        period: &Period,
    ) -> Option<f64> {
        if !period.is_valid(OffsetDateTime::now_utc()) {
            tracing::debug!("reject max instant difference for invalid period {:?}", period);
            return None;
        }

        self.try_max_instant_difference(device_a, device_b, kind, period)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(
                    device_a,
                    device_b,
                    %kind,
                    "max instant difference unavailable: {}",
                    e
                );
                None
            })
    }

    async fn try_max_instant_difference(
        &self,
        device_a: Id,
        device_b: Id,
        kind: SensorKind,
        period: &Period,
    ) -> Result<Option<f64>, SourceError> {
        let sensors_a = self.catalog.resolve_sensors(device_a, kind).await?;
        let sensors_b = self.catalog.resolve_sensors(device_b, kind).await?;

        if sensors_a.is_empty() || sensors_b.is_empty() {
            tracing::debug!(device_a, device_b, %kind, "device without matching sensors");
            return Ok(None);
        }

        let readings_a = self.collect_readings(&sensors_a, period).await?;
        let readings_b = self.collect_readings(&sensors_b, period).await?;

        if readings_a.is_empty() || readings_b.is_empty() {
            return Ok(None);
        }

        Ok(analytics::max_instant_difference(
            &readings_a,
            &readings_b,
            self.tolerance,
        ))
    }

    /// Peak net power (grid minus power sources) across the aggregation windows.
    pub async fn peak_net_power(&self, period: &Period) -> Option<f64> {
        self.peak_net_power_window(period)
            .await
            .map(|peak| peak.value)
    }

    /// Like [`Self::peak_net_power`], also reporting the winning window.
    pub async fn peak_net_power_window(&self, period: &Period) -> Option<NetPowerPeak> {
        if !period.is_valid(OffsetDateTime::now_utc()) {
            tracing::debug!("reject peak net power for invalid period {:?}", period);
            return None;
        }

        self.try_peak_net_power(period).await.unwrap_or_else(|e| {
            tracing::warn!("peak net power unavailable: {}", e);
            None
        })
    }

    async fn try_peak_net_power(&self, period: &Period) -> Result<Option<NetPowerPeak>, SourceError> {
        let grid_meters = self
            .catalog
            .devices_of_category(DeviceCategory::GridPowerMeter)
            .await?;
        let source_meters = self
            .catalog
            .devices_of_category(DeviceCategory::PowerSourcePowerMeter)
            .await?;

        if grid_meters.is_empty() || source_meters.is_empty() {
            tracing::debug!(
                grid_meters = grid_meters.len(),
                source_meters = source_meters.len(),
                "power balance needs both meter categories"
            );
            return Ok(None);
        }

        let grid_sensors = self
            .sensors_of_kind(&grid_meters, SensorKind::PowerConsumption)
            .await?;
        let source_sensors = self
            .sensors_of_kind(&source_meters, SensorKind::PowerConsumption)
            .await?;

        // Fetch everything before aggregating so a failure never leaves a partial sum
        let grid = self.collect_readings(&grid_sensors, period).await?;
        let source = self.collect_readings(&source_sensors, period).await?;

        Ok(analytics::peak_net_power(
            period,
            self.aggregation_window,
            &grid,
            &source,
        ))
    }

    /// All readings of every sensor of a device within the period.
    pub async fn readings_from_device(&self, device_id: Id, period: &Period) -> Option<Vec<Reading>> {
        if !period.is_valid(OffsetDateTime::now_utc()) {
            return None;
        }

        match self.try_readings_from_device(device_id, period).await {
            Ok(readings) => Some(readings),
            Err(e) => {
                tracing::warn!(device_id, "device readings unavailable: {}", e);
                None
            }
        }
    }

    pub async fn reading_ids_from_device(&self, device_id: Id, period: &Period) -> Option<Vec<Id>> {
        self.readings_from_device(device_id, period)
            .await
            .map(|readings| readings.into_iter().map(|reading| reading.id).collect())
    }

    pub async fn get_reading(&self, id: Id) -> Option<Reading> {
        self.source.find_reading(id).await.unwrap_or_else(|e| {
            tracing::warn!(reading_id = id, "reading unavailable: {}", e);
            None
        })
    }

    async fn try_readings_from_device(
        &self,
        device_id: Id,
        period: &Period,
    ) -> Result<Vec<Reading>, SourceError> {
        let mut readings = Vec::new();

        for sensor_id in self.catalog.sensors_of_device(device_id).await? {
            let records = self
                .source
                .records_in_period(sensor_id, period.start, period.end)
                .await?;
            readings.extend(records);
        }

        Ok(readings)
    }

    async fn sensors_of_kind(&self, devices: &[Id], kind: SensorKind) -> Result<Vec<Id>, SourceError> {
        let mut sensors = Vec::new();

        for &device_id in devices {
            sensors.extend(self.catalog.resolve_sensors(device_id, kind).await?);
        }

        Ok(sensors)
    }

    async fn collect_readings(
        &self,
        sensors: &[Id],
        period: &Period,
    ) -> Result<Vec<TimedValue>, SourceError> {
        let mut readings = Vec::new();

        for &sensor_id in sensors {
            let values = self
                .source
                .readings_in_period(sensor_id, period.start, period.end)
                .await?;
            readings.extend(values);
        }

        Ok(readings)
    }
}
