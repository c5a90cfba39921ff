//! Interception proxy over a `RecordStore`
//!
//! `GovernedStore` wraps exactly one delegate and runs the same hook
//! protocol around every contract method:
//!
//! ```text
//! 1. unit.begin(op)
//! 2. policy.authorize(op)
//!    IF denied: unit.rollback(op), return the denial
//!               (delegate never runs, no commit, no audit)
//! 3. delegate call with the original arguments
//! 4. IF delegate succeeded: unit.commit(op), audit.record(op),
//!    return the delegate's result unchanged
//! 5. IF delegate failed: unit.rollback(op),
//!    propagate the original error unchanged (no commit, no audit)
//! ```
//!
//! An audit-sink failure in step 4 is logged at warn level and reported
//! separately; it never overwrites the result being returned.
//!
//! The proxy holds no shared mutable state of its own. Sharing one proxy
//! across threads is safe provided the delegate and the hooks are safe for
//! concurrent invocation; the proxy documents that requirement but does
//! not enforce it, and adds no locking of its own.

use crate::hooks::{AccessPolicy, AuditSink, UnitOfWork};
use gatework_core::{GateResult, Record, RecordId, RecordStore, StoreOp};
use std::sync::Arc;
use tracing::{debug, warn};

/// Proxy implementing `RecordStore` around a fixed delegate
///
/// The delegate and all three hooks are bound at construction and never
/// reassigned.
pub struct GovernedStore<S> {
    /// The wrapped implementation; exclusive, fixed for the proxy's life
    delegate: S,
    policy: Arc<dyn AccessPolicy>,
    unit: Arc<dyn UnitOfWork>,
    audit: Arc<dyn AuditSink>,
}

impl<S: RecordStore> GovernedStore<S> {
    /// Wrap a delegate with the given hooks
    pub fn new(
        delegate: S,
        policy: Arc<dyn AccessPolicy>,
        unit: Arc<dyn UnitOfWork>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        GovernedStore {
            delegate,
            policy,
            unit,
            audit,
        }
    }

    /// Wrap a delegate with allow-all policy, no-op unit, traced audit
    ///
    /// Useful when only the audit line is wanted.
    pub fn permissive(delegate: S) -> Self {
        Self::new(
            delegate,
            Arc::new(crate::hooks::AllowAll),
            Arc::new(crate::hooks::NoopUnit),
            Arc::new(crate::hooks::TracedAudit),
        )
    }

    /// Borrow the wrapped delegate
    pub fn delegate(&self) -> &S {
        &self.delegate
    }

    /// Run one contract call through the hook protocol
    fn gate<T>(&self, op: StoreOp, call: impl FnOnce(&S) -> GateResult<T>) -> GateResult<T> {
        self.unit.begin(&op);

        if let Err(denied) = self.policy.authorize(&op) {
            debug!(%op, error = %denied, "call denied before delegate");
            self.unit.rollback(&op);
            return Err(denied);
        }

        match call(&self.delegate) {
            Ok(value) => {
                self.unit.commit(&op);
                if let Err(audit_err) = self.audit.record(&op) {
                    // Reported separately; the call's result stands.
                    warn!(%op, error = %audit_err, "audit sink failed after commit");
                }
                Ok(value)
            }
            Err(delegate_err) => {
                self.unit.rollback(&op);
                Err(delegate_err)
            }
        }
    }
}

impl<S: RecordStore> RecordStore for GovernedStore<S> {
    fn save(&self, record: Record) -> GateResult<RecordId> {
        let op = StoreOp::Save { id: record.id };
        self.gate(op, move |delegate| delegate.save(record))
    }

    fn delete(&self, id: &RecordId) -> GateResult<bool> {
        let op = StoreOp::Delete { id: *id };
        self.gate(op, |delegate| delegate.delete(id))
    }

    fn find(&self, id: &RecordId) -> GateResult<Option<Record>> {
        let op = StoreOp::Find { id: *id };
        self.gate(op, |delegate| delegate.find(id))
    }
}
