//! Reading analytics: pure computations over sensor readings.
//!
//! Everything here is side-effect free. Fetching goes through the
//! [`SensorCatalog`] and [`ReadingSource`] collaborators, driven by
//! [`crate::services::ReadingService`].

mod aggregator;
mod correlator;
mod period;
mod source;

pub use aggregator::{NetPowerPeak, Window, Windows, peak_net_power};
pub use correlator::max_instant_difference;
pub use period::{Period, is_valid_period};
pub use source::{ReadingSource, SensorCatalog};

use time::OffsetDateTime;

use crate::models::Reading;

/// One sensor observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedValue {
    pub value: f64,
    pub time: OffsetDateTime,
}

impl TimedValue {
    pub fn new(value: f64, time: OffsetDateTime) -> Self {
        Self { value, time }
    }
}

impl From<Reading> for TimedValue {
    fn from(reading: Reading) -> Self {
        Self::new(reading.value, reading.time)
    }
}
