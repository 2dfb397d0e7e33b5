mod reading;
mod sensor;

pub use reading::*;
pub use sensor::*;

pub type Id = i32;
