mod device;
mod reading;
mod sensor;

pub use device::{Device, DeviceTable};
pub use reading::{Reading, ReadingTable};
pub use sensor::{Sensor, SensorTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;
}
