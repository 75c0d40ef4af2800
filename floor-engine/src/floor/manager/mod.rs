//! FloorManager - state container for the floor plan
//!
//! This module handles:
//! - Intent validation and application (via registry and ledger)
//! - Copy-on-write snapshot replacement
//! - Persistence of the whole collection after each mutation
//! - Change broadcasting (channel and observer callbacks)
//!
//! # Command Flow
//!
//! ```text
//! execute(cmd)
//!     ├─ 1. Resolve target table (unknown id → Ignored)
//!     ├─ 2. Build next collection with registry / ledger (validation errors → Err)
//!     ├─ 3. Swap in the new snapshot
//!     ├─ 4. Save the snapshot (failure → Notice, mutation still stands)
//!     ├─ 5. Broadcast FloorEvent and call observers
//!     └─ 6. Return CommandOutcome
//! ```
//!
//! Mutations take `&mut self`: one intent runs to completion before the next.

mod error;
mod events;
pub use error::*;
pub use events::*;

use super::geometry::{self, Canvas};
use super::ledger;
use super::registry::{self, NumberPolicy};
use super::seed;
use super::storage::{SnapshotSource, SnapshotStore, load_or_seed};
use serde::{Deserialize, Serialize};
use shared::models::{MenuItem, OrderDraft, Table};
use shared::money::Money;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// User intents dispatched by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FloorCommand {
    AddTable,
    DeleteTable {
        table_id: i64,
    },
    /// Full replacement record for `table.id`
    UpdateTable {
        table: Table,
    },
    /// Drag end; only honored in arrange mode
    MoveTable {
        table_id: i64,
        offset_x: f64,
        offset_y: f64,
        canvas: Canvas,
    },
    AddOrder {
        table_id: i64,
        draft: OrderDraft,
    },
    DeleteOrder {
        table_id: i64,
        order_id: i64,
    },
}

impl FloorCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTable => "add_table",
            Self::DeleteTable { .. } => "delete_table",
            Self::UpdateTable { .. } => "update_table",
            Self::MoveTable { .. } => "move_table",
            Self::AddOrder { .. } => "add_order",
            Self::DeleteOrder { .. } => "delete_order",
        }
    }

    /// Table the command targets; `None` for `AddTable`
    pub fn table_id(&self) -> Option<i64> {
        match self {
            Self::AddTable => None,
            Self::DeleteTable { table_id }
            | Self::MoveTable { table_id, .. }
            | Self::AddOrder { table_id, .. }
            | Self::DeleteOrder { table_id, .. } => Some(*table_id),
            Self::UpdateTable { table } => Some(table.id),
        }
    }
}

/// Result of a command that passed validation
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The floor changed
    Applied(FloorEvent),
    /// Nothing to do (unknown id, move outside arrange mode)
    Ignored,
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

type Observer = Box<dyn Fn(&FloorEvent, &[Table]) + Send + Sync>;

/// Owner of the current floor snapshot
pub struct FloorManager {
    tables: Arc<Vec<Table>>,
    store: Box<dyn SnapshotStore>,
    menu: Arc<Vec<MenuItem>>,
    number_policy: NumberPolicy,
    arranging: bool,
    startup_source: SnapshotSource,
    event_tx: broadcast::Sender<FloorEvent>,
    observers: Vec<Observer>,
}

impl std::fmt::Debug for FloorManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloorManager")
            .field("tables", &self.tables.len())
            .field("store", &"<SnapshotStore>")
            .field("number_policy", &self.number_policy)
            .field("arranging", &self.arranging)
            .field("startup_source", &self.startup_source)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl FloorManager {
    /// Load the floor from `store` (seeding it when absent or unreadable)
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        let outcome = load_or_seed(store.as_ref());
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        tracing::info!(
            tables = outcome.tables.len(),
            source = ?outcome.source,
            "FloorManager started"
        );
        Self {
            tables: Arc::new(outcome.tables),
            store,
            menu: Arc::new(seed::default_menu()),
            number_policy: NumberPolicy::default(),
            arranging: false,
            startup_source: outcome.source,
            event_tx,
            observers: Vec::new(),
        }
    }

    /// Replace the menu catalog used for order prefill
    pub fn with_menu(mut self, menu: Vec<MenuItem>) -> Self {
        self.menu = Arc::new(menu);
        self
    }

    pub fn with_number_policy(mut self, policy: NumberPolicy) -> Self {
        self.number_policy = policy;
        self
    }

    // ========== Notification ==========

    /// Receive every event broadcast from now on
    pub fn subscribe(&self) -> broadcast::Receiver<FloorEvent> {
        self.event_tx.subscribe()
    }

    /// Register a callback run synchronously after each change
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: Fn(&FloorEvent, &[Table]) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Notice for the host when startup fell back to the seed layout
    pub fn startup_notice(&self) -> Option<Notice> {
        match &self.startup_source {
            SnapshotSource::SeededAfterError(reason) => Some(Notice::SnapshotUnreadable {
                reason: reason.clone(),
            }),
            _ => None,
        }
    }

    pub fn startup_source(&self) -> &SnapshotSource {
        &self.startup_source
    }

    fn notify(&self, event: &FloorEvent) {
        // No receivers is fine
        let _ = self.event_tx.send(event.clone());
        for observer in &self.observers {
            observer(event, &self.tables);
        }
    }

    // ========== Arrange mode ==========

    /// Enable or disable drag-to-position editing
    pub fn set_arranging(&mut self, arranging: bool) {
        if self.arranging != arranging {
            tracing::debug!(arranging, "Arrange mode changed");
        }
        self.arranging = arranging;
    }

    pub fn is_arranging(&self) -> bool {
        self.arranging
    }

    // ========== Queries ==========

    /// Tables in stored (insertion) order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Cheap handle to the current immutable snapshot
    pub fn snapshot(&self) -> Arc<Vec<Table>> {
        Arc::clone(&self.tables)
    }

    /// Tables sorted by display number
    pub fn listing(&self) -> Vec<&Table> {
        registry::sorted_by_number(&self.tables)
    }

    pub fn table(&self, table_id: i64) -> Option<&Table> {
        registry::find_table(&self.tables, table_id)
    }

    /// Bill total for a table; `None` for unknown ids
    pub fn total(&self, table_id: i64) -> Option<Money> {
        self.table(table_id).map(ledger::total)
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    /// Order draft prefilled from a menu entry
    pub fn prefill(&self, menu_id: &str) -> Option<OrderDraft> {
        self.menu
            .iter()
            .find(|item| item.id == menu_id)
            .map(OrderDraft::from_menu_item)
    }

    pub fn number_policy(&self) -> NumberPolicy {
        self.number_policy
    }

    // ========== Commands ==========

    /// Apply one intent
    pub fn execute(&mut self, cmd: FloorCommand) -> ManagerResult<CommandOutcome> {
        let name = cmd.name();
        let result = self.apply(cmd);
        match &result {
            Ok(CommandOutcome::Applied(event)) => {
                tracing::debug!(command = name, event = ?event, "Command applied");
            }
            Ok(CommandOutcome::Ignored) => {
                tracing::debug!(command = name, "Command ignored");
            }
            Err(e) => {
                tracing::info!(command = name, error = %e, "Command rejected");
            }
        }
        result
    }

    fn apply(&mut self, cmd: FloorCommand) -> ManagerResult<CommandOutcome> {
        match cmd {
            FloorCommand::AddTable => {
                let next = registry::add_table(&self.tables);
                let added = next.last().map(|t| (t.id, t.number)).unwrap_or_default();
                Ok(self.commit(
                    next,
                    FloorEvent::TableAdded {
                        table_id: added.0,
                        number: added.1,
                    },
                ))
            }

            FloorCommand::DeleteTable { table_id } => {
                if self.table(table_id).is_none() {
                    return Ok(CommandOutcome::Ignored);
                }
                let next = registry::delete_table(&self.tables, table_id);
                Ok(self.commit(next, FloorEvent::TableDeleted { table_id }))
            }

            FloorCommand::UpdateTable { table } => {
                let (next, stored) =
                    registry::update_table(&self.tables, table, self.number_policy)?;
                match stored {
                    Some(stored) => Ok(self.commit(
                        next,
                        FloorEvent::TableUpdated {
                            table_id: stored.id,
                            status: stored.status,
                        },
                    )),
                    None => Ok(CommandOutcome::Ignored),
                }
            }

            FloorCommand::MoveTable {
                table_id,
                offset_x,
                offset_y,
                canvas,
            } => {
                if !self.arranging {
                    return Ok(CommandOutcome::Ignored);
                }
                let Some(table) = self.table(table_id) else {
                    return Ok(CommandOutcome::Ignored);
                };
                let (x, y) = geometry::clamp_position(table, offset_x, offset_y, canvas);
                let mut moved = table.clone();
                moved.x = x;
                moved.y = y;
                let next = registry::replace_table(&self.tables, &moved);
                Ok(self.commit(next, FloorEvent::TableMoved { table_id, x, y }))
            }

            FloorCommand::AddOrder { table_id, draft } => {
                let Some(table) = self.table(table_id) else {
                    return Ok(CommandOutcome::Ignored);
                };
                let updated = ledger::add_order(table, &draft)?;
                let order_id = updated.orders.last().map(|o| o.id).unwrap_or_default();
                let total = ledger::total(&updated);
                let next = registry::replace_table(&self.tables, &updated);
                Ok(self.commit(
                    next,
                    FloorEvent::OrderAdded {
                        table_id,
                        order_id,
                        total,
                    },
                ))
            }

            FloorCommand::DeleteOrder { table_id, order_id } => {
                let Some(table) = self.table(table_id) else {
                    return Ok(CommandOutcome::Ignored);
                };
                if !table.orders.iter().any(|o| o.id == order_id) {
                    return Ok(CommandOutcome::Ignored);
                }
                let updated = ledger::delete_order(table, order_id);
                let event = FloorEvent::OrderDeleted {
                    table_id,
                    order_id,
                    status: updated.status,
                    total: ledger::total(&updated),
                };
                let next = registry::replace_table(&self.tables, &updated);
                Ok(self.commit(next, event))
            }
        }
    }

    /// Swap in `next`, persist it, then notify
    fn commit(&mut self, next: Vec<Table>, event: FloorEvent) -> CommandOutcome {
        self.tables = Arc::new(next);

        if let Err(e) = self.store.save(&self.tables) {
            tracing::warn!(error = %e, "Failed to save floor snapshot");
            self.notify(&FloorEvent::Notice(Notice::SaveFailed {
                reason: e.to_string(),
            }));
        }

        self.notify(&event);
        CommandOutcome::Applied(event)
    }

    // ========== Convenience wrappers ==========

    pub fn add_table(&mut self) -> ManagerResult<CommandOutcome> {
        self.execute(FloorCommand::AddTable)
    }

    pub fn delete_table(&mut self, table_id: i64) -> ManagerResult<CommandOutcome> {
        self.execute(FloorCommand::DeleteTable { table_id })
    }

    pub fn update_table(&mut self, table: Table) -> ManagerResult<CommandOutcome> {
        self.execute(FloorCommand::UpdateTable { table })
    }

    pub fn move_table(
        &mut self,
        table_id: i64,
        offset_x: f64,
        offset_y: f64,
        canvas: Canvas,
    ) -> ManagerResult<CommandOutcome> {
        self.execute(FloorCommand::MoveTable {
            table_id,
            offset_x,
            offset_y,
            canvas,
        })
    }

    pub fn add_order(&mut self, table_id: i64, draft: OrderDraft) -> ManagerResult<CommandOutcome> {
        self.execute(FloorCommand::AddOrder { table_id, draft })
    }

    pub fn delete_order(&mut self, table_id: i64, order_id: i64) -> ManagerResult<CommandOutcome> {
        self.execute(FloorCommand::DeleteOrder { table_id, order_id })
    }
}

#[cfg(test)]
mod tests;
