//! Floor change notifications
//!
//! Broadcast after every successful mutation, once the new snapshot is in
//! place and has been handed to the store.

use serde::Serialize;
use shared::models::TableStatus;
use shared::money::Money;

/// Non-fatal condition the host should surface to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The stored floor could not be read; the seed layout is in use
    SnapshotUnreadable { reason: String },
    /// The latest floor could not be written to the store
    SaveFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FloorEvent {
    TableAdded {
        table_id: i64,
        number: i64,
    },
    TableUpdated {
        table_id: i64,
        status: TableStatus,
    },
    TableMoved {
        table_id: i64,
        x: f64,
        y: f64,
    },
    TableDeleted {
        table_id: i64,
    },
    OrderAdded {
        table_id: i64,
        order_id: i64,
        total: Money,
    },
    OrderDeleted {
        table_id: i64,
        order_id: i64,
        status: TableStatus,
        total: Money,
    },
    Notice(Notice),
}

impl FloorEvent {
    /// Table the event concerns, if any
    pub fn table_id(&self) -> Option<i64> {
        match self {
            Self::TableAdded { table_id, .. }
            | Self::TableUpdated { table_id, .. }
            | Self::TableMoved { table_id, .. }
            | Self::TableDeleted { table_id }
            | Self::OrderAdded { table_id, .. }
            | Self::OrderDeleted { table_id, .. } => Some(*table_id),
            Self::Notice(_) => None,
        }
    }

    pub fn is_notice(&self) -> bool {
        matches!(self, Self::Notice(_))
    }
}
