//! The capability contract implemented by delegates and proxies
//!
//! `RecordStore` is the swap seam of the kernel: concrete backends, test
//! stubs, and the interception proxy all implement this one trait, so a
//! caller cannot tell (from the signatures) whether it holds a raw store
//! or a governed one.

use crate::error::GateResult;
use crate::types::{Record, RecordId};

/// Fixed, closed set of operations a record store supports
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). A proxy over a store adds no
/// locking of its own; the implementation behind this trait carries its
/// own discipline.
pub trait RecordStore: Send + Sync {
    /// Save a record (upsert semantics), returning its id
    ///
    /// Re-saving an existing id replaces the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record fails the store's validation or the
    /// store fails internally.
    fn save(&self, record: Record) -> GateResult<RecordId>;

    /// Delete a record by id
    ///
    /// Returns true if a record was removed, false if the id was absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails internally.
    fn delete(&self, id: &RecordId) -> GateResult<bool>;

    /// Look up a record by id
    ///
    /// Returns None if the id is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails internally.
    fn find(&self, id: &RecordId) -> GateResult<Option<Record>>;
}

/// Blanket impl so `Arc<S>` (and other smart pointers via Deref) can be
/// handed wherever a store is expected.
impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn save(&self, record: Record) -> GateResult<RecordId> {
        (**self).save(record)
    }

    fn delete(&self, id: &RecordId) -> GateResult<bool> {
        (**self).delete(id)
    }

    fn find(&self, id: &RecordId) -> GateResult<Option<Record>> {
        (**self).find(id)
    }
}
