use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Sensor;

pub struct SensorRepository {
    storage: Arc<Storage>,
}

impl SensorRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl SensorRepository {
    // Create new sensor
    pub async fn create(
        &self,
        item: &Sensor,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO sensors (device_id, name, model_name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(item.device_id)
        .bind(&item.name)
        .bind(&item.model_name)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    // Find sensor by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Sensor>, Error> {
        let sensor: Option<Sensor> = sqlx::query_as("SELECT * FROM sensors WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(sensor)
    }

    // Get all sensors attached to a device
    pub async fn find_by_device_id(&self, device_id: i32) -> Result<Vec<Sensor>, Error> {
        let sensors: Vec<Sensor> =
            sqlx::query_as("SELECT * FROM sensors WHERE device_id = $1 ORDER BY id")
                .bind(device_id)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(sensors)
    }

    // Get the IDs of the sensors of a given model attached to a device
    pub async fn find_ids_by_device_id_and_model(
        &self,
        device_id: i32,
        model_name: &str,
    ) -> Result<Vec<i32>, Error> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT id FROM sensors
            WHERE device_id = $1 AND model_name = $2
            ORDER BY id
            "#,
        )
        .bind(device_id)
        .bind(model_name)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::*;

    use super::*;

    #[tokio::test]
    async fn test_find_sensor_by_id() {
        let storage = setup_test_db().await;
        let device = create_test_device(storage.clone(), "Bedroom Thermostat", "Thermostat").await;
        let sensor =
            create_test_sensor(storage.clone(), device.id, "Temperature 1", "SensorOfTemperature").await;

        let repo = SensorRepository::new(storage.clone());

        let found = repo.find_by_id(sensor.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Temperature 1");
        assert_eq!(found.device_id, device.id);
        assert_eq!(found.model_name, "SensorOfTemperature");
    }

    #[tokio::test]
    async fn test_find_sensors_by_device_and_model() {
        let storage = setup_test_db().await;
        let device = create_test_device(storage.clone(), "Kitchen Hub", "Thermostat").await;
        let other = create_test_device(storage.clone(), "Hall Hub", "Thermostat").await;

        let temperature =
            create_test_sensor(storage.clone(), device.id, "Temperature", "SensorOfTemperature").await;
        let humidity =
            create_test_sensor(storage.clone(), device.id, "Humidity", "SensorOfHumidity").await;
        create_test_sensor(storage.clone(), other.id, "Temperature", "SensorOfTemperature").await;

        let repo = SensorRepository::new(storage.clone());

        let all = repo.find_by_device_id(device.id).await.unwrap();
        let all_ids: Vec<i32> = all.iter().map(|s| s.id).collect();
        assert_eq!(all_ids, vec![temperature.id, humidity.id]);

        let ids = repo
            .find_ids_by_device_id_and_model(device.id, "SensorOfTemperature")
            .await
            .unwrap();
        assert_eq!(ids, vec![temperature.id]);

        let ids = repo
            .find_ids_by_device_id_and_model(device.id, "SensorOfWind")
            .await
            .unwrap();
        assert!(ids.is_empty());
    }
}
