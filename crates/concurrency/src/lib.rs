//! Concurrency layer for Gatework
//!
//! This crate implements the two contention-safe primitives the kernel
//! rests on:
//! - `ServiceCell`: one-shot lifecycle slot for process-wide services,
//!   with eager and lazy (construct-on-first-use) variants
//! - `GuardedCounter`: mutex-disciplined shared counter, plus the
//!   deliberately racy `UnguardedCounter` it is contrasted against
//!
//! Neither primitive performs I/O inside a critical section, and neither
//! exposes cancellation: a service constructor that never returns starves
//! every caller of that cell.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod counter;
pub mod lifecycle;

pub use counter::{GuardedCounter, UnguardedCounter};
pub use lifecycle::{shared_counter, ServiceCell};
