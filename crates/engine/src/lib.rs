//! Interception engine for Gatework
//!
//! This crate wraps any `RecordStore` in a `GovernedStore`, which brackets
//! every call with a fixed hook sequence:
//!
//! ```text
//! begin -> authorize -> delegate -> (commit | rollback) -> audit-on-success
//! ```
//!
//! The proxy implements the same `RecordStore` contract as its delegate
//! and forwards arguments and results unchanged; callers cannot tell from
//! the signatures whether a store is governed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hooks;
pub mod proxy;
pub mod store;

pub use hooks::{
    AccessPolicy, AllowAll, AuditSink, CountingAudit, NoopUnit, ReadOnlyPolicy, TracedAudit,
    TracedUnit, UnitOfWork,
};
pub use proxy::GovernedStore;
pub use store::MemoryStore;
