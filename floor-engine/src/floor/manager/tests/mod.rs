use super::*;
use crate::floor::storage::{RedbSnapshotStore, StorageError, StorageResult};
use crate::floor::validation::ValidationError;
use parking_lot::Mutex;
use shared::models::TableStatus;

// ========================================================================
// Test stores
// ========================================================================

/// Store that records every saved collection
#[derive(Default, Clone)]
struct RecordingStore {
    initial: Option<Vec<Table>>,
    saves: Arc<Mutex<Vec<Vec<Table>>>>,
}

impl RecordingStore {
    fn with_tables(tables: Vec<Table>) -> Self {
        Self {
            initial: Some(tables),
            ..Default::default()
        }
    }

    fn save_count(&self) -> usize {
        self.saves.lock().len()
    }

    fn last_saved(&self) -> Option<Vec<Table>> {
        self.saves.lock().last().cloned()
    }
}

impl SnapshotStore for RecordingStore {
    fn load(&self) -> StorageResult<Option<Vec<Table>>> {
        Ok(self.initial.clone())
    }

    fn save(&self, tables: &[Table]) -> StorageResult<()> {
        self.saves.lock().push(tables.to_vec());
        Ok(())
    }
}

/// Store whose disk is gone
struct BrokenStore;

impl SnapshotStore for BrokenStore {
    fn load(&self) -> StorageResult<Option<Vec<Table>>> {
        Err(StorageError::Corrupted("unexpected end of input".to_string()))
    }

    fn save(&self, _tables: &[Table]) -> StorageResult<()> {
        Err(StorageError::Storage(redb::StorageError::Io(
            std::io::Error::other("disk offline"),
        )))
    }
}

fn seeded_manager() -> FloorManager {
    let store = RedbSnapshotStore::open_in_memory().unwrap();
    FloorManager::new(Box::new(store))
}

fn manager_with(tables: Vec<Table>) -> (FloorManager, RecordingStore) {
    let store = RecordingStore::with_tables(tables);
    let manager = FloorManager::new(Box::new(store.clone()));
    (manager, store)
}

fn table(id: i64, number: i64) -> Table {
    Table::new_default(id, number)
}

fn draft(name: &str, price: f64, quantity: u32) -> OrderDraft {
    OrderDraft::new(name, price, quantity)
}
