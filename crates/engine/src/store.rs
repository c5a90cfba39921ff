//! In-memory record store
//!
//! Reference delegate for the interception proxy: a `DashMap`-backed
//! `RecordStore`. Each map operation touches a single shard lock, so the
//! store is safe to share across threads with no external discipline.

use dashmap::DashMap;
use gatework_core::{GateError, GateResult, Record, RecordId, RecordStore};

/// Concurrent in-memory implementation of `RecordStore`
///
/// Validation: records must carry a non-empty `kind`; saving one without
/// fails with `InvalidRecord` (and the map is untouched).
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<RecordId, Record>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            records: DashMap::new(),
        }
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn save(&self, record: Record) -> GateResult<RecordId> {
        if record.kind.is_empty() {
            return Err(GateError::InvalidRecord {
                reason: "record kind must not be empty".to_string(),
            });
        }
        let id = record.id;
        self.records.insert(id, record);
        Ok(id)
    }

    fn delete(&self, id: &RecordId) -> GateResult<bool> {
        Ok(self.records.remove(id).is_some())
    }

    fn find(&self, id: &RecordId) -> GateResult<Option<Record>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }
}
