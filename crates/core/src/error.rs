//! Error types for the Gatework kernel
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Two error categories matter to callers of a governed store:
//! - `AccessDenied` is raised by the proxy itself, before the delegate runs.
//! - Every other variant surfaces from the delegate (or the lifecycle layer)
//!   and is propagated unchanged. The proxy never translates one kind into
//!   another.

use crate::types::RecordId;
use thiserror::Error;

/// Result type alias for Gatework operations
pub type GateResult<T> = std::result::Result<T, GateError>;

/// Error types for the Gatework kernel
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    /// A lifecycle cell's constructor failed
    ///
    /// The slot stays empty; the next `get()` retries construction.
    #[error("construction failed: {reason}")]
    ConstructionFailed {
        /// Why the constructor failed
        reason: String,
    },

    /// The authorize hook rejected a call before the delegate ran
    ///
    /// Distinct from delegate errors: when this is returned, the delegate
    /// was never invoked.
    #[error("access denied for {operation}: {reason}")]
    AccessDenied {
        /// Rendered `StoreOp` the caller attempted
        operation: String,
        /// Policy's stated reason for the denial
        reason: String,
    },

    /// A record failed delegate-side validation
    #[error("invalid record: {reason}")]
    InvalidRecord {
        /// What the delegate objected to
        reason: String,
    },

    /// Record not found where one was required
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    /// The delegate store failed internally
    #[error("store failure: {message}")]
    StoreFailure {
        /// Delegate's description of the failure
        message: String,
    },

    /// An audit sink failed while recording a successful call
    ///
    /// Reported separately (logged by the proxy); never replaces the
    /// result of the call being audited.
    #[error("audit sink failure: {message}")]
    AuditFailure {
        /// Sink's description of the failure
        message: String,
    },
}

impl GateError {
    /// Shorthand for a construction failure
    pub fn construction(reason: impl Into<String>) -> Self {
        GateError::ConstructionFailed {
            reason: reason.into(),
        }
    }

    /// Shorthand for a denial of the given operation
    pub fn denied(operation: impl ToString, reason: impl Into<String>) -> Self {
        GateError::AccessDenied {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    /// True if this error came from the proxy's authorize hook
    pub fn is_denial(&self) -> bool {
        matches!(self, GateError::AccessDenied { .. })
    }
}
