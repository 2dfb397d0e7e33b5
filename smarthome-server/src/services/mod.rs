pub mod analytics;

mod catalog_service;
mod reading_service;

pub use catalog_service::*;
pub use reading_service::*;
