//! Core client state and access control for the StaffHub HR apps.
//! This crate is the single source of truth for session and store invariants.

pub mod config;
pub mod db;
pub mod guard;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod shell;
pub mod store;

pub use config::{AppConfig, ConfigError, QueryPolicy, RefetchTrigger, ThemeConfig, ThemeMode};
pub use guard::route_guard::{evaluate, GuardDecision, GuardFallback, RouteRequirement};
pub use guard::route_table::{RouteTable, RouteTableError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::role::{parse_role, Role, RoleParseError};
pub use model::session::{Identity, IdentityPatch, PersistedSession, Session};
pub use model::{DomainRecord, RecordStats};
pub use repo::account_repo::{Account, AccountRepository, SqliteAccountRepository};
pub use repo::storage_repo::{
    KeyValueStorage, MemoryKeyValueStorage, SqliteKeyValueStorage, StorageError, StorageResult,
};
pub use service::account_service::{AccountError, AccountService, SeedOutcome};
pub use shell::app_shell::{AppShell, ShellError};
pub use store::domain_store::DomainStore;
pub use store::fetch::{FetchOutcome, FetchTicket, RecordSource};
pub use store::session_store::{SessionError, SessionStore, SESSION_STORAGE_KEY};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
