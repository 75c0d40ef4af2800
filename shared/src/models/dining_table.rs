//! Dining Table Model

use super::order_item::Order;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default geometry for a freshly added table (pixels)
pub const DEFAULT_TABLE_X: f64 = 50.0;
pub const DEFAULT_TABLE_Y: f64 = 50.0;
pub const DEFAULT_TABLE_SIZE: f64 = 110.0;
/// Default seating for a freshly added table
pub const DEFAULT_CAPACITY: u32 = 2;

/// Occupancy state of a table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drawn outline of a table (presentation only)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    #[default]
    Round,
    Square,
    Rectangle,
}

/// Dining table entity
///
/// Position and size are canvas pixels; `x`/`y` is the top-left corner.
/// `orders` keeps insertion order, which is also display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: i64,
    /// Display number, editable independently of `id`
    pub number: i64,
    /// Optional label; empty means unnamed
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub shape: TableShape,
    #[serde(default)]
    pub status: TableStatus,
    pub capacity: u32,
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Expected arrival (`HH:MM`), only meaningful while reserved
    #[serde(default)]
    pub arrival_time: Option<String>,
}

impl Table {
    /// Table with default geometry, available and without orders
    pub fn new_default(id: i64, number: i64) -> Self {
        Self {
            id,
            number,
            name: String::new(),
            x: DEFAULT_TABLE_X,
            y: DEFAULT_TABLE_Y,
            width: DEFAULT_TABLE_SIZE,
            height: DEFAULT_TABLE_SIZE,
            shape: TableShape::Round,
            status: TableStatus::Available,
            capacity: DEFAULT_CAPACITY,
            orders: Vec::new(),
            arrival_time: None,
        }
    }

    /// The display name, if one is set
    pub fn label(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Heading shown on the floor plan and order panel
    pub fn display_label(&self) -> String {
        match self.label() {
            Some(name) => format!("{} (Table {})", name, self.number),
            None => format!("Table {}", self.number),
        }
    }

    pub fn has_orders(&self) -> bool {
        !self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label() {
        let mut table = Table::new_default(2, 2);
        assert_eq!(table.display_label(), "Table 2");

        table.name = "Ventana VIP".to_string();
        assert_eq!(table.display_label(), "Ventana VIP (Table 2)");

        table.name = "   ".to_string();
        assert_eq!(table.label(), None);
    }

    #[test]
    fn test_snapshot_field_names() {
        let mut table = Table::new_default(4, 4);
        table.status = TableStatus::Reserved;
        table.arrival_time = Some("20:30".to_string());

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["status"], "reserved");
        assert_eq!(json["shape"], "round");
        assert_eq!(json["arrivalTime"], "20:30");
        assert!(json["orders"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_browser_blob() {
        let raw = r#"{"id":1,"number":1,"name":"","x":100,"y":100,"width":110,"height":110,
            "shape":"round","status":"available","capacity":2,"orders":[],"arrivalTime":null}"#;
        let table: Table = serde_json::from_str(raw).unwrap();
        assert_eq!(table.id, 1);
        assert_eq!(table.x, 100.0);
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.arrival_time.is_none());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let raw = r#"{"id":9,"number":3,"x":0,"y":0,"width":80,"height":80,"capacity":4}"#;
        let table: Table = serde_json::from_str(raw).unwrap();
        assert_eq!(table.name, "");
        assert_eq!(table.shape, TableShape::Round);
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.orders.is_empty());
    }
}
