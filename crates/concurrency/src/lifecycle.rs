//! One-shot lifecycle management for process-wide services
//!
//! A `ServiceCell` is a single logical slot holding at most one instance
//! of a service for the lifetime of the process. Construction happens at
//! most once per cell, no matter how many threads race to first-access it:
//!
//! 1. `get()` first reads the slot without locking (fast path).
//! 2. On an empty slot it takes the cell's exclusive lock, re-checks
//!    (another thread may have finished construction while this one
//!    waited), and constructs only if still empty.
//! 3. The built instance is published with release/acquire visibility, so
//!    no caller ever observes a partially constructed value.
//!
//! Steps 2-3 are `once_cell::sync::OnceCell::get_or_try_init`; a failed
//! constructor leaves the slot empty so the next `get()` can retry.
//!
//! Uses parking_lot-style non-poisoning primitives throughout; a panicking
//! constructor does not wedge the cell for later callers.

use gatework_core::{GateError, GateResult};
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::counter::GuardedCounter;

type Builder<T> = Box<dyn Fn() -> GateResult<T> + Send + Sync>;

/// One-shot slot for a shared service instance
///
/// Two variants:
/// - `ServiceCell::eager(value)` builds the instance up front, before any
///   concurrent access exists; `get()` is then a plain read.
/// - `ServiceCell::lazy(build)` defers construction to the first `get()`,
///   running the constructor at most once even under concurrent demand.
///
/// After the first successful `get()`, every call returns a clone of the
/// same `Arc` and can no longer fail. There is no cancellation: a
/// constructor that never returns starves all callers of this cell.
pub struct ServiceCell<T> {
    /// The slot; empty until construction succeeds
    slot: OnceCell<Arc<T>>,

    /// Constructor for the lazy variant; None for eager cells, whose slot
    /// is filled at creation time
    build: Option<Builder<T>>,
}

impl<T> ServiceCell<T> {
    /// Create a cell whose instance is constructed on first `get()`
    pub fn lazy<F>(build: F) -> Self
    where
        F: Fn() -> GateResult<T> + Send + Sync + 'static,
    {
        ServiceCell {
            slot: OnceCell::new(),
            build: Some(Box::new(build)),
        }
    }

    /// Create a cell pre-filled with an already-built instance
    ///
    /// Construction happens here, synchronously, before the cell can be
    /// shared; access-time locking is never needed.
    pub fn eager(value: T) -> Self {
        let slot = OnceCell::new();
        // New cell, cannot already be set.
        let _ = slot.set(Arc::new(value));
        ServiceCell { slot, build: None }
    }

    /// Get the service instance, constructing it if this is the first use
    ///
    /// # Errors
    ///
    /// Propagates the constructor's error unchanged. The slot stays empty
    /// after a failure, so a later `get()` retries.
    pub fn get(&self) -> GateResult<Arc<T>> {
        if let Some(built) = self.slot.get() {
            // Fast path: slot already published, no lock taken.
            return Ok(Arc::clone(built));
        }

        self.slot
            .get_or_try_init(|| {
                let build = self.build.as_ref().ok_or_else(|| {
                    // Unreachable by construction: eager cells fill the
                    // slot before the builder could be consulted.
                    GateError::construction("cell has neither instance nor constructor")
                })?;
                let value = build()?;
                debug!(
                    service = std::any::type_name::<T>(),
                    "constructed service instance"
                );
                Ok(Arc::new(value))
            })
            .map(Arc::clone)
    }

    /// Non-blocking probe: true once construction has succeeded
    pub fn ready(&self) -> bool {
        self.slot.get().is_some()
    }
}

// =============================================================================
// Shared named counters
// =============================================================================
//
// Process-wide registry of counters keyed by name, so audit hooks in
// different parts of a process can bump the same total without threading a
// reference through every constructor. Counters are never removed; the
// registry lives for the life of the process.
//
// Uses parking_lot::Mutex instead of std::sync::Mutex so a panicking
// caller cannot poison the registry for everyone else.

/// Global registry of named counters (name -> shared counter)
static SHARED_COUNTERS: Lazy<Mutex<HashMap<String, Arc<GuardedCounter>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Get or create the process-wide counter with this name
///
/// Every caller passing the same name receives the same counter instance.
pub fn shared_counter(name: &str) -> Arc<GuardedCounter> {
    let mut registry = SHARED_COUNTERS.lock();
    Arc::clone(
        registry
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(GuardedCounter::new())),
    )
}
