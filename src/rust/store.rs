use std::sync::{Mutex, MutexGuard};

use rocksdb::{Direction, IteratorMode, Options, WriteBatch, DB};

use crate::config::StoreConfig;
use crate::errors::{StoreError, StoreResult};
use crate::metrics::{MetricsCollector, StoreMetrics};
use crate::protein::{NewProtein, ProteinRecord, ProteinRow};
use crate::search::SearchFilter;
use crate::types::ProteinId;

/// Key prefix of rows in the `proteins` table
const PROTEIN_PREFIX: &[u8] = b"proteins/";

/// Holds the next id to hand out, as big-endian u64
const NEXT_ID_KEY: &[u8] = b"meta/next_id";

/// Single-table persistence for protein records
pub trait ProteinStore {
    /// Insert a new row and return its generated id
    fn create(&self, protein: &NewProtein) -> StoreResult<ProteinId>;

    /// Fetch one row, `StoreError::NotFound` if absent
    fn get_by_id(&self, id: ProteinId) -> StoreResult<ProteinRecord>;

    /// All rows matching `filter`, in insertion order
    fn search(&self, filter: &SearchFilter) -> StoreResult<Vec<ProteinRecord>>;

    /// Replace every mutable field of an existing row
    fn update(&self, id: ProteinId, protein: &NewProtein) -> StoreResult<()>;

    /// Remove a row, `StoreError::NotFound` if absent
    fn delete(&self, id: ProteinId) -> StoreResult<()>;

    /// Number of stored rows
    fn count(&self) -> StoreResult<usize>;
}

fn row_key(id: ProteinId) -> Vec<u8> {
    let mut key = Vec::with_capacity(PROTEIN_PREFIX.len() + 8);
    key.extend_from_slice(PROTEIN_PREFIX);
    key.extend_from_slice(&id.to_be_bytes());
    key
}

fn describe_key(key: &[u8]) -> String {
    match ProteinId::from_be_slice(&key[PROTEIN_PREFIX.len().min(key.len())..]) {
        Some(id) => format!("proteins/{}", id),
        None => String::from_utf8_lossy(key).into_owned(),
    }
}

fn decode_row(key: &[u8], value: &[u8]) -> StoreResult<ProteinRecord> {
    let corrupt = |e: serde_json::Error| StoreError::CorruptRecord {
        key: describe_key(key),
        message: e.to_string(),
    };
    let row: ProteinRow = serde_json::from_slice(value).map_err(corrupt)?;
    row.decode().map_err(corrupt)
}

/// RocksDB-backed [`ProteinStore`].
///
/// Rows live under `proteins/<id as big-endian u64>`, so iterating the prefix
/// yields records in id (insertion) order.
pub struct RocksProteinStore {
    // RocksDB instance for persistent storage
    db: DB,

    // Serializes every write within this process, so an existence check and
    // the write that depends on it cannot interleave with another writer
    write_lock: Mutex<()>,

    metrics: MetricsCollector,
}

impl RocksProteinStore {
    /// Open (or create) the database described by `config`
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(config.create_if_missing);
        if let Some(max_open_files) = config.max_open_files {
            opts.set_max_open_files(max_open_files);
        }

        let db = DB::open(&opts, &config.db_path)?;
        log::debug!("Opened protein database at {}", config.db_path.display());
        Ok(Self::from_db(db))
    }

    /// Wrap an already opened database handle
    pub fn from_db(db: DB) -> Self {
        Self { db, write_lock: Mutex::new(()), metrics: MetricsCollector::new() }
    }

    /// Snapshot of the operations served so far
    pub fn metrics(&self) -> StoreMetrics {
        self.metrics.get_metrics()
    }

    fn next_id(&self) -> StoreResult<ProteinId> {
        match self.db.get(NEXT_ID_KEY)? {
            None => Ok(ProteinId(1)),
            Some(bytes) => ProteinId::from_be_slice(&bytes).ok_or_else(|| {
                StoreError::CorruptRecord {
                    key: String::from_utf8_lossy(NEXT_ID_KEY).into_owned(),
                    message: format!("expected 8 bytes, found {}", bytes.len()),
                }
            }),
        }
    }

    fn exists(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.db.get_pinned(key)?.is_some())
    }

    fn lock_writes(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|e| StoreError::LockError(e.to_string()))
    }

    fn rows(&self) -> impl Iterator<Item = StoreResult<(Box<[u8]>, Box<[u8]>)>> + '_ {
        self.db
            .iterator(IteratorMode::From(PROTEIN_PREFIX, Direction::Forward))
            .map(|item| item.map_err(StoreError::from))
            .take_while(|item| match item {
                Ok((key, _)) => key.starts_with(PROTEIN_PREFIX),
                Err(_) => true,
            })
    }

    fn put_row(
        &self,
        batch: &mut WriteBatch,
        id: ProteinId,
        protein: &NewProtein,
    ) -> StoreResult<()> {
        let row = ProteinRow::encode(id, protein)?;
        batch.put(row_key(id), serde_json::to_vec(&row)?);
        Ok(())
    }

    fn observe<T>(&self, result: StoreResult<T>) -> StoreResult<T> {
        if let Err(err) = &result {
            if !matches!(err, StoreError::NotFound(_)) {
                self.metrics.record_failure();
            }
        }
        result
    }

    fn create_inner(&self, protein: &NewProtein) -> StoreResult<ProteinId> {
        let _guard = self.lock_writes()?;

        let id = self.next_id()?;
        let mut batch = WriteBatch::default();
        self.put_row(&mut batch, id, protein)?;
        batch.put(NEXT_ID_KEY, (id.get() + 1).to_be_bytes());

        // Counter and row land together or not at all
        self.db.write(batch)?;
        Ok(id)
    }

    fn get_inner(&self, id: ProteinId) -> StoreResult<ProteinRecord> {
        let key = row_key(id);
        match self.db.get(&key)? {
            Some(value) => decode_row(&key, &value),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn search_inner(&self, filter: &SearchFilter) -> StoreResult<Vec<ProteinRecord>> {
        let mut results = Vec::new();

        for item in self.rows() {
            let (key, value) = item?;
            let record = decode_row(&key, &value)?;
            if filter.matches(&record) {
                results.push(record);
            }
        }

        Ok(results)
    }

    fn update_inner(&self, id: ProteinId, protein: &NewProtein) -> StoreResult<()> {
        let _guard = self.lock_writes()?;
        if !self.exists(&row_key(id))? {
            return Err(StoreError::NotFound(id));
        }
        let mut batch = WriteBatch::default();
        self.put_row(&mut batch, id, protein)?;
        self.db.write(batch)?;
        Ok(())
    }

    fn delete_inner(&self, id: ProteinId) -> StoreResult<()> {
        let _guard = self.lock_writes()?;
        let key = row_key(id);
        if !self.exists(&key)? {
            return Err(StoreError::NotFound(id));
        }
        self.db.delete(&key)?;
        Ok(())
    }
}

impl ProteinStore for RocksProteinStore {
    fn create(&self, protein: &NewProtein) -> StoreResult<ProteinId> {
        self.metrics.record_create();
        let id = self.observe(self.create_inner(protein))?;
        log::info!("Created protein {} ({})", id, protein.name);
        Ok(id)
    }

    fn get_by_id(&self, id: ProteinId) -> StoreResult<ProteinRecord> {
        self.metrics.record_read();
        self.observe(self.get_inner(id))
    }

    fn search(&self, filter: &SearchFilter) -> StoreResult<Vec<ProteinRecord>> {
        self.metrics.record_search();
        let results =
            crate::time_operation!("search", { self.observe(self.search_inner(filter)) })?;
        log::debug!("Search {:?} matched {} record(s)", filter, results.len());
        Ok(results)
    }

    fn update(&self, id: ProteinId, protein: &NewProtein) -> StoreResult<()> {
        self.metrics.record_update();
        self.observe(self.update_inner(id, protein))?;
        log::info!("Updated protein {}", id);
        Ok(())
    }

    fn delete(&self, id: ProteinId) -> StoreResult<()> {
        self.metrics.record_delete();
        self.observe(self.delete_inner(id))?;
        log::info!("Deleted protein {}", id);
        Ok(())
    }

    fn count(&self) -> StoreResult<usize> {
        let mut count = 0;
        for item in self.rows() {
            item?;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(dir: &std::path::Path) -> RocksProteinStore {
        RocksProteinStore::open(&StoreConfig::new(dir.join("proteins.db"))).unwrap()
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let protein = NewProtein::from_sequence("p", "ACDE");

        let first = store.create(&protein).unwrap();
        let second = store.create(&protein).unwrap();
        assert_eq!(first, ProteinId(1));
        assert_eq!(second, ProteinId(2));

        store.delete(second).unwrap();
        assert_eq!(store.create(&protein).unwrap(), ProteinId(3));
    }

    #[test]
    fn test_counter_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = open_store(dir.path());
            store.create(&NewProtein::from_sequence("p", "ACDE")).unwrap();
        }
        let store = open_store(dir.path());
        let id = store.create(&NewProtein::from_sequence("q", "W")).unwrap();
        assert_eq!(id, ProteinId(2));
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_search_ignores_counter_key_and_keeps_id_order() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        for i in 0..300 {
            store.create(&NewProtein::from_sequence(&format!("p{}", i), "GG")).unwrap();
        }

        let all = store.search(&SearchFilter::All).unwrap();
        assert_eq!(all.len(), 300);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_corrupt_row_is_reported() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        store.db.put(row_key(ProteinId(5)), b"{not json").unwrap();

        let err = store.get_by_id(ProteinId(5)).unwrap_err();
        assert!(matches!(err, StoreError::CorruptRecord { ref key, .. } if key == "proteins/5"));
        assert_eq!(store.metrics().failures, 1);
    }

    #[test]
    fn test_missing_database_without_create() {
        let dir = tempdir().unwrap();
        let mut config = StoreConfig::new(dir.path().join("absent.db"));
        config.create_if_missing = false;

        assert!(matches!(RocksProteinStore::open(&config), Err(StoreError::Database(_))));
    }

    #[test]
    fn test_metrics_track_operations() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let id = store.create(&NewProtein::from_sequence("p", "AC")).unwrap();
        store.get_by_id(id).unwrap();
        store.search(&SearchFilter::All).unwrap();
        let _ = store.delete(ProteinId(99));

        let metrics = store.metrics();
        assert_eq!(metrics.creates, 1);
        assert_eq!(metrics.reads, 1);
        assert_eq!(metrics.searches, 1);
        assert_eq!(metrics.deletes, 1);
        assert_eq!(metrics.failures, 0);
    }

    #[test]
    fn test_count_skips_decoding_and_search_metrics() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        assert_eq!(store.count().unwrap(), 0);

        store.create(&NewProtein::from_sequence("p", "AC")).unwrap();
        store.create(&NewProtein::from_sequence("q", "DE")).unwrap();
        store.db.put(row_key(ProteinId(9)), b"{not json").unwrap();

        assert_eq!(store.count().unwrap(), 3);
        assert_eq!(store.metrics().searches, 0);
    }

    #[test]
    fn test_update_never_resurrects_a_deleted_row() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());
        let replacement = NewProtein::from_sequence("q", "WW");

        for _ in 0..200 {
            let id = store.create(&NewProtein::from_sequence("p", "AC")).unwrap();

            let (deleted, updated) = std::thread::scope(|s| {
                let deleter = s.spawn(|| store.delete(id).is_ok());
                let updater = s.spawn(|| store.update(id, &replacement).is_ok());
                (deleter.join().unwrap(), updater.join().unwrap())
            });

            assert!(deleted);
            let live = store.get_by_id(id).is_ok();
            assert!(!live, "row {} survived a successful delete (update ok: {})", id, updated);
        }
    }
}
