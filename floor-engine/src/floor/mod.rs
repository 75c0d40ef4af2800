//! Floor plan data core
//!
//! - **geometry**: drag-move clamping against the canvas
//! - **ledger**: per-table orders and bill totals
//! - **registry**: table collection edits and listing order
//! - **storage**: redb snapshot persistence and startup fallback
//! - **manager**: FloorManager, the single owner of the current snapshot
//!
//! # Architecture
//!
//! ```text
//! FloorCommand → FloorManager → registry / ledger → new snapshot
//!                      ↓                                 ↓
//!                  FloorEvent                  SnapshotStore (redb)
//!                      ↓
//!          subscribers + observers
//! ```

pub mod geometry;
pub mod ledger;
pub mod manager;
pub mod registry;
pub mod seed;
pub mod storage;
pub mod validation;

pub use geometry::Canvas;
pub use manager::{
    CommandOutcome, FloorCommand, FloorEvent, FloorManager, ManagerError, ManagerResult, Notice,
};
pub use registry::NumberPolicy;
pub use storage::{RedbSnapshotStore, SnapshotSource, SnapshotStore, StorageError};
pub use validation::ValidationError;
