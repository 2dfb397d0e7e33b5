mod schema;
mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{Analytics, Catalog, Database, Logger, Server, Settings};
pub use storage::Storage;
