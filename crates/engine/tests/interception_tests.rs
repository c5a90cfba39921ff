//! Interception protocol tests
//!
//! Tests for the governed-store call protocol:
//! - Hook ordering on the success path
//! - Short-circuit on authorization denial
//! - Error pass-through and audit non-masking
//! - Argument/result transparency

use gatework_core::{GateError, GateResult, Record, RecordId, RecordStore, StoreOp};
use gatework_engine::{
    AccessPolicy, AuditSink, GovernedStore, MemoryStore, NoopUnit, ReadOnlyPolicy, TracedAudit,
    UnitOfWork,
};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ============================================================================
// Recording stubs
// ============================================================================

/// Shared call log the stubs append to, so one test can see the exact
/// interleaving of hooks and delegate.
#[derive(Default)]
struct CallLog {
    entries: Mutex<Vec<String>>,
}

impl CallLog {
    fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

struct RecordingPolicy {
    log: Arc<CallLog>,
    deny: bool,
}

impl AccessPolicy for RecordingPolicy {
    fn authorize(&self, op: &StoreOp) -> GateResult<()> {
        self.log.push("authorize");
        if self.deny {
            Err(GateError::denied(op, "recording policy set to deny"))
        } else {
            Ok(())
        }
    }
}

struct RecordingUnit {
    log: Arc<CallLog>,
}

impl UnitOfWork for RecordingUnit {
    fn begin(&self, _op: &StoreOp) {
        self.log.push("begin");
    }

    fn commit(&self, _op: &StoreOp) {
        self.log.push("commit");
    }

    fn rollback(&self, _op: &StoreOp) {
        self.log.push("rollback");
    }
}

struct RecordingAudit {
    log: Arc<CallLog>,
    fail: bool,
}

impl AuditSink for RecordingAudit {
    fn record(&self, _op: &StoreOp) -> GateResult<()> {
        self.log.push("audit");
        if self.fail {
            Err(GateError::AuditFailure {
                message: "recording sink set to fail".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Delegate that logs its invocations on top of a real in-memory store
struct RecordingStore {
    log: Arc<CallLog>,
    inner: MemoryStore,
}

impl RecordingStore {
    fn new(log: Arc<CallLog>) -> Self {
        RecordingStore {
            log,
            inner: MemoryStore::new(),
        }
    }
}

impl RecordStore for RecordingStore {
    fn save(&self, record: Record) -> GateResult<RecordId> {
        self.log.push("delegate");
        self.inner.save(record)
    }

    fn delete(&self, id: &RecordId) -> GateResult<bool> {
        self.log.push("delegate");
        self.inner.delete(id)
    }

    fn find(&self, id: &RecordId) -> GateResult<Option<Record>> {
        self.log.push("delegate");
        self.inner.find(id)
    }
}

fn recording_proxy(deny: bool, fail_audit: bool) -> (Arc<CallLog>, GovernedStore<RecordingStore>) {
    let log = Arc::new(CallLog::default());
    let proxy = GovernedStore::new(
        RecordingStore::new(Arc::clone(&log)),
        Arc::new(RecordingPolicy {
            log: Arc::clone(&log),
            deny,
        }),
        Arc::new(RecordingUnit {
            log: Arc::clone(&log),
        }),
        Arc::new(RecordingAudit {
            log: Arc::clone(&log),
            fail: fail_audit,
        }),
    );
    (log, proxy)
}

// ============================================================================
// Hook Ordering
// ============================================================================

#[test]
fn success_path_fires_hooks_in_order() {
    init_tracing();
    let (log, proxy) = recording_proxy(false, false);

    proxy.save(Record::new("order", "{}")).unwrap();

    assert_eq!(
        log.entries(),
        vec!["begin", "authorize", "delegate", "commit", "audit"]
    );
}

#[test]
fn every_contract_method_runs_the_same_protocol() {
    let (log, proxy) = recording_proxy(false, false);
    let id = proxy.save(Record::new("order", "{}")).unwrap();
    proxy.find(&id).unwrap();
    proxy.delete(&id).unwrap();

    let expected_one_call = ["begin", "authorize", "delegate", "commit", "audit"];
    let entries = log.entries();
    assert_eq!(entries.len(), expected_one_call.len() * 3);
    for call in entries.chunks(expected_one_call.len()) {
        assert_eq!(call, expected_one_call);
    }
}

#[test]
fn delegate_failure_rolls_back_and_skips_commit_and_audit() {
    let (log, proxy) = recording_proxy(false, false);

    // Empty kind fails the delegate's validation.
    let err = proxy.save(Record::new("", "payload")).unwrap_err();
    assert!(matches!(err, GateError::InvalidRecord { .. }));

    assert_eq!(log.entries(), vec!["begin", "authorize", "delegate", "rollback"]);
}

// ============================================================================
// Denial Short-Circuit
// ============================================================================

#[test]
fn denial_aborts_before_delegate() {
    let (log, proxy) = recording_proxy(true, false);

    let err = proxy.save(Record::new("order", "{}")).unwrap_err();
    assert!(err.is_denial());

    let entries = log.entries();
    assert_eq!(entries, vec!["begin", "authorize", "rollback"]);
    assert!(
        !entries.iter().any(|e| e == "delegate"),
        "delegate must never run on denial"
    );
}

#[test]
fn denied_write_leaves_delegate_untouched() {
    let proxy = GovernedStore::new(
        MemoryStore::new(),
        Arc::new(ReadOnlyPolicy),
        Arc::new(NoopUnit),
        Arc::new(TracedAudit),
    );

    let record = Record::new("order", "{}");
    let id = record.id;
    assert!(proxy.save(record).unwrap_err().is_denial());
    assert!(proxy.delete(&id).unwrap_err().is_denial());

    // Reads still pass, and see an empty store.
    assert_eq!(proxy.find(&id).unwrap(), None);
    assert!(proxy.delegate().is_empty());
}

// ============================================================================
// Transparency
// ============================================================================

#[test]
fn delegate_error_surfaces_with_kind_unchanged() {
    let proxy = GovernedStore::permissive(MemoryStore::new());
    let direct = MemoryStore::new();

    let record = Record::new("", "payload");
    let via_proxy = proxy.save(record.clone()).unwrap_err();
    let via_direct = direct.save(record).unwrap_err();

    assert_eq!(via_proxy, via_direct);
}

#[test]
fn audit_failure_does_not_mask_success() {
    init_tracing();
    let (log, proxy) = recording_proxy(false, true);

    let record = Record::new("order", "{}");
    let id = proxy.save(record.clone()).unwrap();
    assert_eq!(id, record.id);

    // The full success protocol ran, audit failure included.
    assert_eq!(
        log.entries(),
        vec!["begin", "authorize", "delegate", "commit", "audit"]
    );
    // And the stored state reflects the successful call.
    assert_eq!(proxy.find(&id).unwrap(), Some(record));
}

proptest! {
    /// For arbitrary records, the proxy's results are byte-for-byte the
    /// results of calling the delegate directly.
    #[test]
    fn proxy_is_transparent_for_arbitrary_records(
        kind in "[a-z]{1,12}",
        payload in ".{0,64}",
    ) {
        let proxy = GovernedStore::permissive(MemoryStore::new());
        let direct = MemoryStore::new();

        let record = Record::new(kind, payload);

        let id_via_proxy = proxy.save(record.clone()).unwrap();
        let id_via_direct = direct.save(record.clone()).unwrap();
        prop_assert_eq!(id_via_proxy, id_via_direct);

        prop_assert_eq!(
            proxy.find(&record.id).unwrap(),
            direct.find(&record.id).unwrap()
        );

        prop_assert_eq!(
            proxy.delete(&record.id).unwrap(),
            direct.delete(&record.id).unwrap()
        );
        prop_assert_eq!(proxy.delete(&record.id).unwrap(), false);
    }
}
