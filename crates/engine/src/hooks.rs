//! Hook seams for the interception proxy
//!
//! Three seams, one per cross-cutting concern:
//! - `AccessPolicy`: may this call proceed at all?
//! - `UnitOfWork`: transaction-like bracketing around the delegate call
//! - `AuditSink`: success-path recording
//!
//! Hooks receive the `StoreOp` descriptor, never the record payload; a
//! hook cannot alter arguments or results in transit. All hooks must be
//! safe for concurrent invocation when one proxy is shared across threads.

use gatework_concurrency::GuardedCounter;
use gatework_core::{GateError, GateResult, StoreOp};
use std::sync::Arc;
use tracing::{debug, info};

/// Permission check run after `begin` and before the delegate
///
/// Returning `Err(AccessDenied)` aborts the call: the delegate is never
/// invoked, the unit of work rolls back, and no audit entry is written.
pub trait AccessPolicy: Send + Sync {
    /// Decide whether this operation may proceed
    ///
    /// # Errors
    ///
    /// `AccessDenied` to reject the call. Any other error is treated the
    /// same way by the proxy (the call aborts before the delegate).
    fn authorize(&self, op: &StoreOp) -> GateResult<()>;
}

/// Transaction-like bracketing around every delegate call
///
/// Exactly one of `commit` / `rollback` runs per `begin`:
/// - `commit` after a successful delegate call
/// - `rollback` on denial or delegate failure
///
/// Hooks are infallible on purpose: bracketing is observational here, and
/// a failure inside it must not be able to mask the call's own outcome.
pub trait UnitOfWork: Send + Sync {
    /// Open the logical unit of work for this call
    fn begin(&self, op: &StoreOp);

    /// Close the unit after delegate success
    fn commit(&self, op: &StoreOp);

    /// Close the unit on the abort path (denial or delegate failure)
    fn rollback(&self, op: &StoreOp);
}

/// Success-path audit recording
///
/// Runs after `commit`, only when the delegate succeeded. A sink failure
/// is logged by the proxy and reported separately; it never replaces the
/// call's result.
pub trait AuditSink: Send + Sync {
    /// Record one successful operation
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot record the entry. The proxy
    /// logs it and still returns the delegate's result.
    fn record(&self, op: &StoreOp) -> GateResult<()>;
}

// =============================================================================
// Stock policies
// =============================================================================

/// Policy that admits every operation
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn authorize(&self, _op: &StoreOp) -> GateResult<()> {
        Ok(())
    }
}

/// Policy that denies writes and admits reads
///
/// `find` passes; `save` and `delete` are rejected with `AccessDenied`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadOnlyPolicy;

impl AccessPolicy for ReadOnlyPolicy {
    fn authorize(&self, op: &StoreOp) -> GateResult<()> {
        if op.is_write() {
            Err(GateError::denied(op, "store is read-only"))
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// Stock units of work
// =============================================================================

/// Unit of work that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopUnit;

impl UnitOfWork for NoopUnit {
    fn begin(&self, _op: &StoreOp) {}
    fn commit(&self, _op: &StoreOp) {}
    fn rollback(&self, _op: &StoreOp) {}
}

/// Unit of work that logs each transition at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracedUnit;

impl UnitOfWork for TracedUnit {
    fn begin(&self, op: &StoreOp) {
        debug!(%op, "begin unit of work");
    }

    fn commit(&self, op: &StoreOp) {
        debug!(%op, "commit unit of work");
    }

    fn rollback(&self, op: &StoreOp) {
        debug!(%op, "rollback unit of work");
    }
}

// =============================================================================
// Stock audit sinks
// =============================================================================

/// Audit sink that writes one info-level log line per successful call
#[derive(Debug, Default, Clone, Copy)]
pub struct TracedAudit;

impl AuditSink for TracedAudit {
    fn record(&self, op: &StoreOp) -> GateResult<()> {
        info!(%op, "audit");
        Ok(())
    }
}

/// Audit sink that bumps a shared counter per successful call
///
/// The counter is typically a process-wide one from
/// `gatework_concurrency::shared_counter`, letting several proxies feed
/// one total.
#[derive(Debug, Clone)]
pub struct CountingAudit {
    calls: Arc<GuardedCounter>,
}

impl CountingAudit {
    /// Audit into the given counter
    pub fn new(calls: Arc<GuardedCounter>) -> Self {
        CountingAudit { calls }
    }

    /// Total successful calls recorded so far
    pub fn total(&self) -> u64 {
        self.calls.read()
    }
}

impl AuditSink for CountingAudit {
    fn record(&self, _op: &StoreOp) -> GateResult<()> {
        self.calls.increment();
        Ok(())
    }
}
