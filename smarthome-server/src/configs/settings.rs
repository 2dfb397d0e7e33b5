use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};
use smarthome_api::{DeviceCategory, SensorKind};
use time::Duration;

use crate::errors::ConfigError;

const DEFAULT_SETTINGS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../",
    "configs/default.toml"
));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub migration_path: Option<String>,
    pub clean_start: bool,
    pub url: String,
}

/// Time windows of the reading analytics, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    /// Max gap for two readings to be compared as simultaneous.
    pub tolerance_seconds: u32,
    /// Slice length of the peak net power search.
    pub aggregation_window_seconds: u32,
}

impl Analytics {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance_seconds == 0 {
            return Err(ConfigError::Invalid(
                "analytics.tolerance_seconds must be positive".into(),
            ));
        }
        if self.aggregation_window_seconds == 0 {
            return Err(ConfigError::Invalid(
                "analytics.aggregation_window_seconds must be positive".into(),
            ));
        }

        Ok(())
    }

    pub fn tolerance(&self) -> Duration {
        Duration::seconds(i64::from(self.tolerance_seconds))
    }

    pub fn aggregation_window(&self) -> Duration {
        Duration::seconds(i64::from(self.aggregation_window_seconds))
    }
}

/// Persisted names behind the sensor kinds and device categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub temperature_model: String,
    pub power_consumption_model: String,
    pub grid_meter_type: String,
    pub power_source_meter_type: String,
}

impl Catalog {
    pub fn model_name(&self, kind: SensorKind) -> &str {
        match kind {
            SensorKind::Temperature => &self.temperature_model,
            SensorKind::PowerConsumption => &self.power_consumption_model,
        }
    }

    pub fn device_type(&self, category: DeviceCategory) -> &str {
        match category {
            DeviceCategory::GridPowerMeter => &self.grid_meter_type,
            DeviceCategory::PowerSourcePowerMeter => &self.power_source_meter_type,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("catalog.temperature_model", &self.temperature_model),
            ("catalog.power_consumption_model", &self.power_consumption_model),
            ("catalog.grid_meter_type", &self.grid_meter_type),
            ("catalog.power_source_meter_type", &self.power_source_meter_type),
        ];

        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{key} must not be empty")));
            }
        }

        if self.grid_meter_type == self.power_source_meter_type {
            return Err(ConfigError::Invalid(
                "catalog.grid_meter_type and catalog.power_source_meter_type must differ".into(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
    pub analytics: Analytics,
    pub catalog: Catalog,
}

impl Settings {
    /// Embedded defaults overlaid with `configs/<RUN_MODE>.toml` when present.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());
        let overlay_path = Path::new("configs").join(format!("{run_mode}.toml"));

        let overlay = if overlay_path.is_file() {
            Some(fs::read_to_string(&overlay_path)?)
        } else {
            None
        };

        Self::from_sources(DEFAULT_SETTINGS, overlay.as_deref())
    }

    /// Embedded defaults only.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_sources(DEFAULT_SETTINGS, None)
    }

    pub fn from_sources(base: &str, overlay: Option<&str>) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(base)?;

        if let Some(overlay) = overlay {
            merge_tables(&mut table, toml::from_str(overlay)?);
        }

        let mut settings: Settings = toml::Value::Table(table).try_into()?;

        if let Some(migrate) = &settings.database.migration_path {
            if Path::new(migrate).is_dir() {
                let migrate_path = normalize_path(migrate)?.to_string_lossy().to_string();

                settings.database.migration_path = Some(migrate_path);
            } else {
                settings.database.migration_path = None;
            }
        }

        settings.analytics.validate()?;
        settings.catalog.validate()?;

        Ok(settings)
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) =
            (base.get_mut(&key), &value)
        {
            merge_tables(existing, incoming.clone());
            continue;
        }

        base.insert(key, value);
    }
}

fn normalize_path(path: &str) -> io::Result<PathBuf> {
    let path_buf = PathBuf::from(path);

    Ok(if path_buf.is_absolute() {
        path_buf
    } else {
        env::current_dir()?.join(&path_buf)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_load() {
        let settings = Settings::from_sources(DEFAULT_SETTINGS, None).unwrap();

        assert_eq!(settings.analytics.tolerance_seconds, 60);
        assert_eq!(settings.analytics.aggregation_window_seconds, 900);
        assert_eq!(settings.analytics.tolerance(), Duration::minutes(1));
        assert_eq!(settings.catalog.model_name(SensorKind::Temperature), "SensorOfTemperature");
        assert_eq!(
            settings.catalog.device_type(DeviceCategory::PowerSourcePowerMeter),
            "PowerSourcePowerMeter"
        );
    }

    #[test]
    fn test_overlay_merges_nested_keys() {
        let overlay = r#"
            [logger]
            level = "trace"

            [analytics]
            tolerance_seconds = 30
        "#;

        let settings = Settings::from_sources(DEFAULT_SETTINGS, Some(overlay)).unwrap();

        assert_eq!(settings.logger.level, "trace");
        assert_eq!(settings.analytics.tolerance_seconds, 30);
        // Untouched sibling survives the merge
        assert_eq!(settings.analytics.aggregation_window_seconds, 900);
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_zero_windows_fail_fast() {
        let overlay = r#"
            [analytics]
            aggregation_window_seconds = 0
        "#;

        let result = Settings::from_sources(DEFAULT_SETTINGS, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let overlay = r#"
            [analytics]
            tolerance_seconds = 0
        "#;

        let result = Settings::from_sources(DEFAULT_SETTINGS, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_window_is_malformed() {
        let overlay = r#"
            [analytics]
            tolerance_seconds = -5
        "#;

        let result = Settings::from_sources(DEFAULT_SETTINGS, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_section_is_malformed() {
        let base = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
        "#;

        let result = Settings::from_sources(base, None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_catalog_name_rejected() {
        let overlay = r#"
            [catalog]
            temperature_model = " "
        "#;

        let result = Settings::from_sources(DEFAULT_SETTINGS, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
