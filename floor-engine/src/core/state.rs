use crate::core::Config;
use crate::floor::storage::StorageResult;
use crate::floor::{FloorManager, NumberPolicy, RedbSnapshotStore, SnapshotStore, registry, seed};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, Table};
use std::path::Path;

/// Floor engine state
///
/// Owns the configuration and the single [`FloorManager`].
#[derive(Debug)]
pub struct FloorState {
    pub config: Config,
    pub floor: FloorManager,
}

impl FloorState {
    pub fn new(config: Config, floor: FloorManager) -> Self {
        Self { config, floor }
    }

    /// Open storage, load the floor and the menu
    ///
    /// Never fails: an unusable database falls back to in-memory storage and
    /// an unusable menu file falls back to the built-in catalog. Both are
    /// logged as warnings.
    pub fn initialize(config: &Config) -> Self {
        let store = open_store(config);
        let menu = match &config.menu_file {
            Some(path) => load_menu(path).unwrap_or_else(|e| {
                tracing::warn!(path = %path, error = %e, "Menu file unusable, using built-in menu");
                seed::default_menu()
            }),
            None => seed::default_menu(),
        };

        let floor = FloorManager::new(store)
            .with_menu(menu)
            .with_number_policy(config.number_policy);

        let duplicates = registry::duplicate_numbers(floor.tables());
        if !duplicates.is_empty() {
            match config.number_policy {
                NumberPolicy::Permissive => {
                    tracing::info!(?duplicates, "Several tables share a number")
                }
                NumberPolicy::Unique => tracing::warn!(
                    ?duplicates,
                    "Stored floor has shared numbers; edits must resolve them"
                ),
            }
        }

        Self::new(config.clone(), floor)
    }
}

fn open_store(config: &Config) -> Box<dyn SnapshotStore> {
    let db_path = config.db_path();
    let opened = std::fs::create_dir_all(&config.work_dir)
        .map_err(|e| e.to_string())
        .and_then(|_| RedbSnapshotStore::open(&db_path).map_err(|e| e.to_string()));

    match opened {
        Ok(store) => {
            tracing::info!(path = %db_path.display(), "Floor database opened");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(
                path = %db_path.display(),
                error = %e,
                "Floor database unavailable, changes will not survive a restart"
            );
            match RedbSnapshotStore::open_in_memory() {
                Ok(store) => Box::new(store),
                Err(e) => {
                    tracing::error!(error = %e, "In-memory database unavailable");
                    Box::new(NullStore)
                }
            }
        }
    }
}

/// Read a JSON array of menu items
pub fn load_menu(path: impl AsRef<Path>) -> AppResult<Vec<MenuItem>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::with_message(
            ErrorCode::ConfigError,
            format!("cannot read {}: {}", path.display(), e),
        )
    })?;
    let menu: Vec<MenuItem> = serde_json::from_slice(&bytes).map_err(|e| {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("invalid menu {}: {}", path.display(), e),
        )
    })?;
    tracing::info!(items = menu.len(), path = %path.display(), "Menu loaded");
    Ok(menu)
}

/// Store that keeps nothing
struct NullStore;

impl SnapshotStore for NullStore {
    fn load(&self) -> StorageResult<Option<Vec<Table>>> {
        Ok(None)
    }

    fn save(&self, _tables: &[Table]) -> StorageResult<()> {
        Ok(())
    }
}
