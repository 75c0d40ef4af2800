//! Shared types for the floor-plan workspace
//!
//! Data model (tables, orders, menu entries), fixed-point money and the
//! unified error codes used by `floor-engine` and by whatever presentation
//! layer hosts it.

pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{MenuItem, Order, OrderDraft, Table, TableShape, TableStatus};
pub use money::Money;
pub use serde::{Deserialize, Serialize};
