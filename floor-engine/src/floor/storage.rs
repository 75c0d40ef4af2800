//! redb-based snapshot storage for the floor
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `snapshots` | `"restaurantTables"` | JSON snapshot envelope | Whole floor, one entry |
//!
//! The whole table collection is the unit of persistence: every save
//! rewrites the single entry in one write transaction.
//!
//! # Snapshot format
//!
//! ```json
//! { "version": 1, "tables": [ { "id": 1, "number": 1, ... } ] }
//! ```
//!
//! A bare JSON array of tables (the unversioned format written by earlier
//! browser builds) is accepted on load and rewritten versioned on the next
//! save.

use super::seed;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::Table;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for the floor snapshot: key = storage key, value = JSON bytes
const SNAPSHOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

/// Well-known key of the floor snapshot
pub const SNAPSHOT_KEY: &str = "restaurantTables";

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot corrupted: {0}")]
    Corrupted(String),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),
}

impl StorageError {
    /// Stored bytes exist but cannot be turned into tables
    pub fn is_unreadable_snapshot(&self) -> bool {
        matches!(self, Self::Corrupted(_) | Self::UnsupportedVersion(_))
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        if err.is_unreadable_snapshot() {
            AppError::with_message(ErrorCode::SnapshotCorrupted, err.to_string())
        } else {
            AppError::storage(err.to_string())
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence contract consumed by the floor manager
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> StorageResult<Option<Vec<Table>>>;
    fn save(&self, tables: &[Table]) -> StorageResult<()>;
}

#[derive(Serialize)]
struct SnapshotEnvelopeRef<'a> {
    version: u32,
    tables: &'a [Table],
}

/// Envelope with the tables left undecoded until the version is known
#[derive(Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    tables: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSnapshot {
    Versioned(SnapshotEnvelope),
    Legacy(Vec<serde_json::Value>),
}

/// Serialize tables into the versioned snapshot envelope
pub fn encode_snapshot(tables: &[Table]) -> StorageResult<Vec<u8>> {
    let envelope = SnapshotEnvelopeRef {
        version: SNAPSHOT_VERSION,
        tables,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Parse snapshot bytes (versioned or legacy array)
///
/// The envelope version is checked before the tables are decoded, so a
/// newer layout is reported as [`StorageError::UnsupportedVersion`].
pub fn decode_snapshot(bytes: &[u8]) -> StorageResult<Vec<Table>> {
    let stored: StoredSnapshot =
        serde_json::from_slice(bytes).map_err(|e| StorageError::Corrupted(e.to_string()))?;
    match stored {
        StoredSnapshot::Versioned(envelope) if envelope.version > SNAPSHOT_VERSION => {
            Err(StorageError::UnsupportedVersion(envelope.version))
        }
        StoredSnapshot::Versioned(envelope) => decode_tables(envelope.tables),
        StoredSnapshot::Legacy(items) => {
            let tables = decode_tables(serde_json::Value::Array(items))?;
            tracing::info!(count = tables.len(), "Loaded unversioned floor snapshot");
            Ok(tables)
        }
    }
}

fn decode_tables(value: serde_json::Value) -> StorageResult<Vec<Table>> {
    serde_json::from_value(value).map_err(|e| StorageError::Corrupted(e.to_string()))
}

/// Floor snapshot storage backed by redb
#[derive(Clone)]
pub struct RedbSnapshotStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbSnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbSnapshotStore").finish_non_exhaustive()
    }
}

impl RedbSnapshotStore {
    /// Open or create the database at the given path
    ///
    /// redb commits are durable once `commit()` returns and the file is
    /// always left in a consistent state.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open a database that lives only in memory
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Raw bytes stored under [`SNAPSHOT_KEY`]
    pub fn load_raw(&self) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;
        Ok(table.get(SNAPSHOT_KEY)?.map(|guard| guard.value().to_vec()))
    }

    /// Store bytes under [`SNAPSHOT_KEY`] as-is
    ///
    /// Used to import a blob exported from another host; it is decoded on
    /// the next load.
    pub fn store_raw(&self, bytes: &[u8]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
            table.insert(SNAPSHOT_KEY, bytes)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Drop the stored snapshot; the next startup seeds again
    pub fn clear(&self) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
            table.remove(SNAPSHOT_KEY)?;
        }
        txn.commit()?;
        Ok(())
    }
}

impl SnapshotStore for RedbSnapshotStore {
    fn load(&self) -> StorageResult<Option<Vec<Table>>> {
        match self.load_raw()? {
            Some(bytes) => decode_snapshot(&bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, tables: &[Table]) -> StorageResult<()> {
        let bytes = encode_snapshot(tables)?;
        self.store_raw(&bytes)?;
        tracing::debug!(count = tables.len(), bytes = bytes.len(), "Floor snapshot saved");
        Ok(())
    }
}

/// Where the startup collection came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum SnapshotSource {
    /// Decoded from the store
    Stored,
    /// Nothing stored yet; seed layout installed
    SeededEmpty,
    /// Stored data could not be read; seed layout installed
    SeededAfterError(String),
}

/// Startup collection plus its origin
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub tables: Vec<Table>,
    pub source: SnapshotSource,
}

/// Load the floor once at startup, falling back to the seed layout
///
/// Never fails: absent or unreadable data yields the seed layout. The seed
/// is saved only when nothing was stored; unreadable bytes stay in place
/// until the first mutation overwrites them.
pub fn load_or_seed(store: &dyn SnapshotStore) -> LoadOutcome {
    let source = match store.load() {
        Ok(Some(tables)) => {
            tracing::info!(count = tables.len(), "Floor snapshot loaded");
            return LoadOutcome {
                tables,
                source: SnapshotSource::Stored,
            };
        }
        Ok(None) => {
            tracing::info!("No floor snapshot stored, installing seed layout");
            SnapshotSource::SeededEmpty
        }
        Err(e) => {
            tracing::warn!(error = %e, "Floor snapshot unreadable, installing seed layout");
            SnapshotSource::SeededAfterError(e.to_string())
        }
    };

    let tables = seed::seed_tables();
    if source == SnapshotSource::SeededEmpty
        && let Err(e) = store.save(&tables)
    {
        tracing::warn!(error = %e, "Failed to persist seed layout");
    }
    LoadOutcome { tables, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Order, TableStatus};
    use shared::money::Money;

    fn sample_tables() -> Vec<Table> {
        let mut a = Table::new_default(1, 1);
        a.name = "Barra".to_string();
        a.status = TableStatus::Occupied;
        a.orders = vec![Order {
            id: 1,
            name: "Té Chai".to_string(),
            price: Money::from_cents(4050),
            quantity: 3,
        }];
        let mut b = Table::new_default(3, 2);
        b.status = TableStatus::Reserved;
        b.arrival_time = Some("19:45".to_string());
        b.x = 412.5;
        vec![a, b]
    }

    #[test]
    fn test_empty_store_loads_none() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_preserves_tables() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        let tables = sample_tables();
        store.save(&tables).unwrap();
        assert_eq!(store.load().unwrap(), Some(tables));
    }

    #[test]
    fn test_save_overwrites() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        store.save(&sample_tables()).unwrap();
        store.save(&[]).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![]));
    }

    #[test]
    fn test_envelope_carries_version() {
        let bytes = encode_snapshot(&sample_tables()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["version"], SNAPSHOT_VERSION);
        assert_eq!(value["tables"].as_array().unwrap().len(), 2);
        assert_eq!(value["tables"][1]["arrivalTime"], "19:45");
    }

    #[test]
    fn test_legacy_array_is_accepted() {
        let legacy = serde_json::to_vec(&sample_tables()).unwrap();
        assert_eq!(decode_snapshot(&legacy).unwrap(), sample_tables());
    }

    #[test]
    fn test_garbage_is_corrupted() {
        let err = decode_snapshot(b"{not json").unwrap_err();
        assert!(matches!(err, StorageError::Corrupted(_)));
        assert!(err.is_unreadable_snapshot());

        let err = decode_snapshot(br#"{"version":1,"tables":"nope"}"#).unwrap_err();
        assert!(matches!(err, StorageError::Corrupted(_)));
    }

    #[test]
    fn test_future_version_is_rejected() {
        let err = decode_snapshot(br#"{"version":99,"tables":[]}"#).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedVersion(99)));

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::SnapshotCorrupted);
    }

    #[test]
    fn test_future_version_checked_before_tables() {
        // table records in a layout this build cannot read
        let err = decode_snapshot(br#"{"version":2,"tables":[{"id":1,"seats":{"a":1}}]}"#)
            .unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedVersion(2)));

        let err = decode_snapshot(br#"{"version":1,"tables":[{"id":1}]}"#).unwrap_err();
        assert!(matches!(err, StorageError::Corrupted(_)));
    }

    #[test]
    fn test_legacy_array_with_bad_records_is_corrupted() {
        let err = decode_snapshot(br#"[{"id":1,"quantity":2.5}]"#).unwrap_err();
        assert!(matches!(err, StorageError::Corrupted(_)));
    }

    #[test]
    fn test_load_or_seed_on_empty_store() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        let outcome = load_or_seed(&store);
        assert_eq!(outcome.source, SnapshotSource::SeededEmpty);
        assert_eq!(outcome.tables, seed::seed_tables());
        // seed persisted
        assert_eq!(store.load().unwrap(), Some(seed::seed_tables()));
    }

    #[test]
    fn test_load_or_seed_on_corrupted_store() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        store.store_raw(b"\x00\x01garbage").unwrap();

        let outcome = load_or_seed(&store);
        assert!(matches!(outcome.source, SnapshotSource::SeededAfterError(_)));
        assert_eq!(outcome.tables.len(), 6);
        // unreadable bytes are kept for recovery
        assert_eq!(store.load_raw().unwrap().unwrap(), b"\x00\x01garbage".to_vec());
    }

    #[test]
    fn test_load_or_seed_keeps_newer_snapshot() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        let newer = br#"{"version":2,"tables":[{"id":1}]}"#;
        store.store_raw(newer).unwrap();

        let outcome = load_or_seed(&store);
        assert_eq!(
            outcome.source,
            SnapshotSource::SeededAfterError(StorageError::UnsupportedVersion(2).to_string())
        );
        assert_eq!(store.load_raw().unwrap().unwrap(), newer.to_vec());
    }

    #[test]
    fn test_load_or_seed_uses_stored_tables() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        store.save(&sample_tables()).unwrap();
        let outcome = load_or_seed(&store);
        assert_eq!(outcome.source, SnapshotSource::Stored);
        assert_eq!(outcome.tables, sample_tables());
    }

    #[test]
    fn test_clear() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        store.save(&sample_tables()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
