use crate::models::{DeviceTable, ReadingTable, SensorTable, Table};

/// Tables in creation order; disposal runs in reverse.
pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(tables: Vec<Box<dyn Table>>) -> Self {
        Self { tables }
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        // Referenced tables first
        SchemaManager::new(vec![
            Box::new(DeviceTable),
            Box::new(SensorTable),
            Box::new(ReadingTable),
        ])
    }
}
