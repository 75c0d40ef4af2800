//! Data models
//!
//! The snapshot shape of these types is the persisted format: camelCase
//! field names and lowercase enum values.

pub mod dining_table;
pub mod menu;
pub mod order_item;

// Re-exports
pub use dining_table::*;
pub use menu::*;
pub use order_item::*;
