use std::sync::Arc;

use async_trait::async_trait;
use smarthome_api::Id;
use sqlx::{Error, Sqlite, Transaction};
use time::{OffsetDateTime, UtcOffset};

use crate::configs::Storage;
use crate::errors::SourceError;
use crate::models::Reading;
use crate::services::analytics::ReadingSource;

pub struct ReadingRepository {
    storage: Arc<Storage>,
}

impl ReadingRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl ReadingRepository {
    // Create new reading
    pub async fn create(
        &self,
        item: &Reading,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO readings (sensor_id, value, time)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(item.sensor_id)
        .bind(item.value)
        .bind(item.time.to_offset(UtcOffset::UTC))
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    // Find reading by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Reading>, Error> {
        let reading: Option<Reading> = sqlx::query_as("SELECT * FROM readings WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(reading)
    }

    // Get sensor readings within a given time range, both ends included.
    // Stored text may carry any offset or fraction, so compare as instants.
    pub async fn find_by_sensor_id_and_time_range(
        &self,
        sensor_id: i32,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
    ) -> Result<Vec<Reading>, Error> {
        let readings: Vec<Reading> = sqlx::query_as(
            r#"
            SELECT * FROM readings
            WHERE sensor_id = $1
                AND julianday(time) >= julianday($2)
                AND julianday(time) <= julianday($3)
            ORDER BY julianday(time) ASC
            "#,
        )
        .bind(sensor_id)
        .bind(start_time.to_offset(UtcOffset::UTC))
        .bind(end_time.to_offset(UtcOffset::UTC))
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(readings)
    }
}

#[async_trait]
impl ReadingSource for ReadingRepository {
    async fn records_in_period(
        &self,
        sensor_id: Id,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<Vec<Reading>, SourceError> {
        Ok(self.find_by_sensor_id_and_time_range(sensor_id, start, end).await?)
    }

    async fn find_reading(&self, id: Id) -> Result<Option<Reading>, SourceError> {
        Ok(self.find_by_id(id).await?)
    }
}
