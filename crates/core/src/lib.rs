//! Core types for the Gatework kernel
//!
//! This crate defines the foundational pieces shared by every layer:
//! - Error types (`GateError`, `GateResult`)
//! - Record types (`RecordId`, `Record`) and the operation descriptor
//!   (`StoreOp`) handed to interception hooks
//! - The `RecordStore` capability contract that delegates and proxies
//!   both implement
//!
//! No other Gatework crate is a dependency of this one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{GateError, GateResult};
pub use traits::RecordStore;
pub use types::{Record, RecordId, StoreOp};
