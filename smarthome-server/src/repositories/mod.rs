mod device;
mod reading;
mod sensor;

pub use device::DeviceRepository;
pub use reading::ReadingRepository;
pub use sensor::SensorRepository;
