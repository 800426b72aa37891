//! Domain model for a lab component.
use serde::{Deserialize, Serialize};

/// Derived stock classification for a component, based on how much of the
/// total stock is still on the shelf. Never stored; recomputed per read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockLevel {
    OutOfStock,
    /// Less than 20% of total stock available
    Low,
    /// Less than 50% of total stock available
    Medium,
    Good,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub category: String,
    pub total_quantity: u32,
    pub available_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Component {
    /// Generate a unique component ID based on the current timestamp.
    /// Format: comp-<timestamp_ms>-<random_suffix>
    /// Example: comp-1625846400123-af3c
    pub fn generate_id(timestamp_ms: u64) -> String {
        let random_suffix = super::generate_random_suffix(4);
        format!("comp-{}-{}", timestamp_ms, random_suffix)
    }

    /// Units currently out with students.
    pub fn in_use(&self) -> u32 {
        self.total_quantity - self.available_quantity
    }

    pub fn stock_level(&self) -> StockLevel {
        if self.available_quantity == 0 {
            return StockLevel::OutOfStock;
        }
        // total_quantity > 0 here, since available <= total
        let percentage = self.available_quantity as f64 / self.total_quantity as f64 * 100.0;
        if percentage < 20.0 {
            StockLevel::Low
        } else if percentage < 50.0 {
            StockLevel::Medium
        } else {
            StockLevel::Good
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(total: u32, available: u32) -> Component {
        Component {
            id: "comp-1-test".to_string(),
            name: "Arduino Uno".to_string(),
            category: "Microcontroller".to_string(),
            total_quantity: total,
            available_quantity: available,
            description: None,
        }
    }

    #[test]
    fn test_generate_id_format() {
        let id = Component::generate_id(1625846400123);
        assert!(id.starts_with("comp-1625846400123-"));
    }

    #[test]
    fn test_in_use() {
        assert_eq!(component(10, 4).in_use(), 6);
        assert_eq!(component(10, 10).in_use(), 0);
    }

    #[test]
    fn test_stock_level_thresholds() {
        assert_eq!(component(10, 0).stock_level(), StockLevel::OutOfStock);
        assert_eq!(component(10, 1).stock_level(), StockLevel::Low);
        assert_eq!(component(10, 2).stock_level(), StockLevel::Medium);
        assert_eq!(component(10, 4).stock_level(), StockLevel::Medium);
        assert_eq!(component(10, 5).stock_level(), StockLevel::Good);
        assert_eq!(component(10, 10).stock_level(), StockLevel::Good);
    }
}
