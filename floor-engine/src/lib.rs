//! Floor Engine - restaurant floor plan and per-table bills
//!
//! # Overview
//!
//! Keeps the floor's table records (position, shape, status, reservation)
//! with each table's order lines, validates every edit, and persists the
//! whole floor as one snapshot after each change.
//!
//! # Module structure
//!
//! ```text
//! floor-engine/src/
//! ├── core/          # Config, FloorState
//! ├── floor/         # geometry, ledger, registry, storage, manager
//! └── utils/         # logging
//! ```

pub mod core;
pub mod floor;
pub mod utils;

pub use core::{Config, FloorState};
pub use floor::{
    Canvas, CommandOutcome, FloorCommand, FloorEvent, FloorManager, ManagerError, Notice,
    NumberPolicy, RedbSnapshotStore, SnapshotStore,
};
pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and start logging
///
/// Call once, before [`Config::from_env`].
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}
