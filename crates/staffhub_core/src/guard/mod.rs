//! Route access control.
//!
//! # Responsibility
//! - Gate screen rendering by authentication and role allow-lists.
//!
//! # Invariants
//! - Guard decisions read the session; they never mutate it.

pub mod route_guard;
pub mod route_table;
