use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::InventoryData;

/// JsonConnection manages the data directory and ensures the inventory file
/// exists before repositories touch it.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new JSON connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new JSON connection in the default data directory
    /// (`<Documents>/Lab Inventory`, falling back to the home directory).
    pub fn new_default() -> Result<Self> {
        let documents_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = documents_dir.join("Lab Inventory");
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the file path of the inventory blob
    pub fn inventory_file_path(&self) -> PathBuf {
        self.base_directory.join("inventory.json")
    }

    /// Ensure the inventory file exists, seeding it with an empty store
    pub fn ensure_inventory_file_exists(&self) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        let file_path = self.inventory_file_path();
        if !file_path.exists() {
            let empty = serde_json::to_string_pretty(&InventoryData::default())?;
            fs::write(&file_path, empty)?;
        }

        Ok(())
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}
