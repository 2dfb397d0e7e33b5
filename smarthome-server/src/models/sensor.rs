use serde::{Deserialize, Serialize};

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sensor {
    pub id: i32,
    pub device_id: i32,
    pub name: String,
    /// Sensor model name, matched against the configured catalog
    pub model_name: String,
}

#[derive(Clone)]
pub struct SensorTable;

impl Table for SensorTable {
    fn name(&self) -> &'static str {
        "sensors"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS sensors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                device_id INTEGER NOT NULL,
                name VARCHAR(255) NOT NULL,
                model_name VARCHAR(255) NOT NULL,
                FOREIGN KEY (device_id) REFERENCES devices (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS sensors;")
    }
}
