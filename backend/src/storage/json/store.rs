use anyhow::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};

use crate::storage::traits::{InventoryData, InventoryStore};

use super::connection::JsonConnection;

/// JSON-file inventory store.
///
/// The whole blob is read and rewritten on every mutation; writes go through
/// a temp file and a rename so a crash mid-write never corrupts the store.
#[derive(Clone)]
pub struct JsonInventoryStore {
    connection: JsonConnection,
}

impl JsonInventoryStore {
    /// Create a new JSON inventory store
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl InventoryStore for JsonInventoryStore {
    fn load(&self) -> Result<InventoryData> {
        self.connection.ensure_inventory_file_exists()?;

        let file_path = self.connection.inventory_file_path();
        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let data = serde_json::from_reader(reader)?;

        Ok(data)
    }

    fn save(&self, data: &InventoryData) -> Result<()> {
        let file_path = self.connection.inventory_file_path();

        // Write to a temporary file for an atomic replace
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, data)?;
            writer.flush()?;
        }

        // Atomic move from temp to final file
        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}
