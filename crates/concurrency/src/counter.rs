//! Guarded and unguarded shared counters
//!
//! `GuardedCounter` is the primitive the rest of the kernel uses: a
//! mutex-disciplined integer whose read-modify-write is indivisible with
//! respect to every other `increment`/`read` on the same instance. All
//! operations serialize on one lock, so a total order exists in which each
//! operation sees the cumulative effect of all prior ones.
//!
//! `UnguardedCounter` is the contrast case: the same logical API with a
//! deliberately split read-then-store, so concurrent increments overwrite
//! each other (the classic lost-update race). It exists to be tested
//! against, not to be used.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counter with a mutual-exclusion discipline
///
/// The lock covers both `increment` and `read`: a reader never observes a
/// value mid-update, and after any concurrent schedule the value equals
/// the number of completed increments. Keep the critical sections short;
/// no I/O happens (or should happen) while the lock is held.
#[derive(Debug, Default)]
pub struct GuardedCounter {
    value: Mutex<u64>,
}

impl GuardedCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a counter with a specific starting value
    pub fn starting_at(initial: u64) -> Self {
        GuardedCounter {
            value: Mutex::new(initial),
        }
    }

    /// Atomically add one to the counter
    pub fn increment(&self) {
        self.add(1);
    }

    /// Atomically add `n` to the counter
    pub fn add(&self, n: u64) {
        let mut value = self.value.lock();
        *value += n;
    }

    /// Read the current value under the same lock as `increment`
    pub fn read(&self) -> u64 {
        *self.value.lock()
    }
}

/// Counter without a mutual-exclusion discipline
///
/// `increment` is a plain read, add, store: the load and the store are
/// individually atomic (so the demonstration stays free of undefined
/// behavior) but the read-modify-write as a whole is not. Two concurrent
/// increments can both read the same value and one update is lost. Under
/// concurrent callers the final count is undefined and may be strictly
/// less than the number of calls.
///
/// This type exists so the race is observable in tests. Use
/// `GuardedCounter` for anything real.
#[derive(Debug, Default)]
pub struct UnguardedCounter {
    value: AtomicU64,
}

impl UnguardedCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        UnguardedCounter {
            value: AtomicU64::new(0),
        }
    }

    /// Add one to the counter, non-atomically
    ///
    /// Read, add, store. No exclusion covers the sequence.
    pub fn increment(&self) {
        let current = self.value.load(Ordering::Relaxed);
        self.value.store(current + 1, Ordering::Relaxed);
    }

    /// Read the current value
    pub fn read(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}
