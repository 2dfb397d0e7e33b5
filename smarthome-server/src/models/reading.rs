use serde::{Deserialize, Serialize};
use smarthome_api::ReadingResponse;
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    pub id: i32,
    pub sensor_id: i32,
    pub value: f64,
    /// The time of the reading
    pub time: OffsetDateTime,
}

impl From<Reading> for ReadingResponse {
    fn from(reading: Reading) -> Self {
        ReadingResponse {
            id: reading.id,
            sensor_id: reading.sensor_id,
            value: reading.value,
            time: reading.time,
        }
    }
}

#[derive(Clone)]
pub struct ReadingTable;

impl Table for ReadingTable {
    fn name(&self) -> &'static str {
        "readings"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sensor_id INTEGER NOT NULL,
                value REAL NOT NULL,
                time TIMESTAMP NOT NULL,
                FOREIGN KEY (sensor_id) REFERENCES sensors (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS readings;")
    }
}
