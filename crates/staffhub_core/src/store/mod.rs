//! Client-side state containers.
//!
//! # Responsibility
//! - Hold the session and per-feature domain state for one app instance.
//! - Keep derived stats consistent with records after every mutation.
//!
//! # Invariants
//! - Stores are plain owned values; there are no process-wide singletons.
//! - Out-of-order fetch completions are discarded via `FetchTicket`s.

pub mod alerts;
pub mod dashboard;
pub mod domain_store;
pub mod employees;
pub mod fetch;
pub mod notifications;
pub mod session_store;
pub mod tasks;
pub mod training;
