//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the app shell and CLI decoupled from storage details.

pub mod account_service;
