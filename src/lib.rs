//! Gatework - governed access to shared services
//!
//! Gatework is a small process-local kernel with three composable pieces:
//! one-shot lifecycle cells for shared service instances, contention-safe
//! counters, and an interception proxy that brackets every call to a
//! `RecordStore` with begin / authorize / commit-or-rollback / audit hooks.
//!
//! # Quick Start
//!
//! ```
//! use gatework::{governed_memory_store, Record, RecordStore};
//!
//! // An in-memory store behind the default (permissive) hooks
//! let store = governed_memory_store();
//!
//! let record = Record::new("order", "{\"total\": 10}");
//! let id = store.save(record)?;
//! assert!(store.find(&id)?.is_some());
//! # Ok::<(), gatework::GateError>(())
//! ```
//!
//! # Architecture
//!
//! `gatework-core` defines the `RecordStore` contract and error types;
//! `gatework-concurrency` provides `ServiceCell` and the counters;
//! `gatework-engine` provides the hooks, the in-memory delegate, and the
//! `GovernedStore` proxy. This crate re-exports the public API of all
//! three.

pub use gatework_core::{GateError, GateResult, Record, RecordId, RecordStore, StoreOp};

pub use gatework_concurrency::{shared_counter, GuardedCounter, ServiceCell, UnguardedCounter};

pub use gatework_engine::{
    AccessPolicy, AllowAll, AuditSink, CountingAudit, GovernedStore, MemoryStore, NoopUnit,
    ReadOnlyPolicy, TracedAudit, TracedUnit, UnitOfWork,
};

/// A fresh in-memory store behind allow-all policy, no-op unit of work,
/// and traced audit
pub fn governed_memory_store() -> GovernedStore<MemoryStore> {
    GovernedStore::permissive(MemoryStore::new())
}
