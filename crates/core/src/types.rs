//! Core types for Gatework
//!
//! This module defines the foundational types:
//! - RecordId: Unique identifier for stored records
//! - Record: The value held by a `RecordStore`
//! - StoreOp: Operation descriptor passed to every interception hook

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a stored record
///
/// A RecordId is a wrapper around a UUID v4. Ids are assigned when the
/// record value is created, not by the store, so a record keeps its
/// identity when passed through proxies or between stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Create a new random RecordId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a RecordId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse a RecordId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the raw bytes of this RecordId
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value held by a `RecordStore`
///
/// Plain data holder with no invariant beyond its types. Stores may apply
/// their own validation on save (the in-memory store rejects an empty
/// `kind`, for example), but the record itself enforces nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identity of the record, stable across saves
    pub id: RecordId,
    /// Caller-defined record category ("order", "invoice", ...)
    pub kind: String,
    /// Opaque payload; the kernel never inspects it
    pub payload: String,
    /// When the record value was created
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Create a record with a fresh id and the current timestamp
    pub fn new(kind: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            kind: kind.into(),
            payload: payload.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a record with a caller-chosen id
    ///
    /// Used when re-saving an existing record (upsert keeps the id).
    pub fn with_id(id: RecordId, kind: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            payload: payload.into(),
            created_at: Utc::now(),
        }
    }
}

/// Operation descriptor handed to every interception hook
///
/// One variant per `RecordStore` contract method. Hooks receive the
/// descriptor by reference and must not rely on any ordering between
/// descriptors beyond the per-call protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreOp {
    /// A `save` call for the record with this id
    Save {
        /// Id of the record being saved
        id: RecordId,
    },
    /// A `delete` call for this id
    Delete {
        /// Id being deleted
        id: RecordId,
    },
    /// A `find` call for this id
    Find {
        /// Id being looked up
        id: RecordId,
    },
}

impl StoreOp {
    /// The record id this operation touches
    pub fn record_id(&self) -> RecordId {
        match self {
            StoreOp::Save { id } | StoreOp::Delete { id } | StoreOp::Find { id } => *id,
        }
    }

    /// Short verb for log and audit lines
    pub fn verb(&self) -> &'static str {
        match self {
            StoreOp::Save { .. } => "save",
            StoreOp::Delete { .. } => "delete",
            StoreOp::Find { .. } => "find",
        }
    }

    /// True if this operation mutates the store
    pub fn is_write(&self) -> bool {
        matches!(self, StoreOp::Save { .. } | StoreOp::Delete { .. })
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb(), self.record_id())
    }
}
