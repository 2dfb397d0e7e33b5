use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Device;

pub struct DeviceRepository {
    storage: Arc<Storage>,
}

impl DeviceRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl DeviceRepository {
    pub async fn create(
        &self,
        item: &Device,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO devices (name, device_type)
            VALUES ($1, $2)
            "#,
        )
        .bind(&item.name)
        .bind(&item.device_type)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Device>, Error> {
        let device: Option<Device> = sqlx::query_as("SELECT * FROM devices WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(device)
    }

    pub async fn find_ids_by_type(&self, device_type: &str) -> Result<Vec<i32>, Error> {
        let ids: Vec<i32> =
            sqlx::query_scalar("SELECT id FROM devices WHERE device_type = $1 ORDER BY id")
                .bind(device_type)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(ids)
    }
}
