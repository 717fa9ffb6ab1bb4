//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage seams used by stores and services.
//! - Isolate SQLite query details from session and account logic.

pub mod account_repo;
pub mod storage_repo;
