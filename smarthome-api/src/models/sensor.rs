use serde::{Deserialize, Serialize};

/// Measured quantity of a sensor, resolved against the configured sensor models.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Ambient temperature in Celsius
    #[default]
    Temperature,
    /// Instantaneous power in watts
    PowerConsumption,
}

impl core::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            SensorKind::Temperature => write!(f, "temperature"),
            SensorKind::PowerConsumption => write!(f, "power_consumption"),
        }
    }
}

/// Device classification used to pick the two sides of the power balance.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    /// Meter on the utility grid connection
    GridPowerMeter,
    /// Meter on a local power source such as solar panels
    PowerSourcePowerMeter,
}

impl core::fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            DeviceCategory::GridPowerMeter => write!(f, "grid_power_meter"),
            DeviceCategory::PowerSourcePowerMeter => write!(f, "power_source_power_meter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_kind_wire_format() {
        assert_eq!(serde_json::to_string(&SensorKind::Temperature).unwrap(), "\"temperature\"");
        assert_eq!(
            serde_json::from_str::<SensorKind>("\"power_consumption\"").unwrap(),
            SensorKind::PowerConsumption
        );
        assert_eq!(SensorKind::default(), SensorKind::Temperature);
    }

    #[test]
    fn test_display_matches_serde() {
        for kind in [SensorKind::Temperature, SensorKind::PowerConsumption] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{kind}\""));
        }
        for category in [DeviceCategory::GridPowerMeter, DeviceCategory::PowerSourcePowerMeter] {
            assert_eq!(serde_json::to_string(&category).unwrap(), format!("\"{category}\""));
        }
    }
}
