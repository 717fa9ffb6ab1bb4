//! Client-side domain model for the HR apps.
//!
//! # Responsibility
//! - Define identity/session shapes owned by the session store.
//! - Define per-feature domain records and their derived statistics.
//!
//! # Invariants
//! - Every domain record is identified by a stable string `id`.
//! - Stats are a pure function of a record slice; no incremental counters.

pub mod alert;
pub mod dashboard;
pub mod employee;
pub mod notification;
pub mod role;
pub mod session;
pub mod task;
pub mod training;

/// Record held by a domain store.
pub trait DomainRecord: Clone {
    /// Partial update applied by `DomainStore::update_record`.
    type Patch;

    fn id(&self) -> &str;

    /// Returns a copy of `self` with `patch` applied.
    fn patched(&self, patch: &Self::Patch) -> Self;
}

/// Aggregate statistics derived from a full record list.
pub trait RecordStats<R>: Clone + Default {
    fn from_records(records: &[R]) -> Self;
}
