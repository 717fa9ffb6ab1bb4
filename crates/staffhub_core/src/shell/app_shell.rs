//! Application composition root.
//!
//! # Responsibility
//! - Build the session store, route table and domain stores for one app
//!   instance from `AppConfig`.
//! - Route every navigation through the guard.
//!
//! # Invariants
//! - The shell holds no business rules; it only wires components.
//! - Signing out clears every domain store and invalidates in-flight fetches,
//!   so one user's records never render for the next.

use crate::config::{AppConfig, QueryPolicy, ThemeConfig};
use crate::guard::route_guard::{GuardDecision, GuardFallback};
use crate::guard::route_table::RouteTable;
use crate::model::session::Identity;
use crate::repo::account_repo::AccountRepository;
use crate::repo::storage_repo::KeyValueStorage;
use crate::service::account_service::{AccountError, AccountService};
use crate::store::alerts::AlertStore;
use crate::store::dashboard::DashboardStore;
use crate::store::employees::EmployeeStore;
use crate::store::notifications::NotificationStore;
use crate::store::session_store::{SessionError, SessionStore};
use crate::store::tasks::TaskStore;
use crate::store::training::TrainingStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Shell-level errors.
#[derive(Debug)]
pub enum ShellError {
    Session(SessionError),
    Account(AccountError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::Account(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            Self::Account(err) => Some(err),
        }
    }
}

impl From<SessionError> for ShellError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<AccountError> for ShellError {
    fn from(value: AccountError) -> Self {
        Self::Account(value)
    }
}

/// One running app instance: session, routes and feature stores.
pub struct AppShell<S: KeyValueStorage> {
    config: AppConfig,
    fallback: GuardFallback,
    routes: RouteTable,
    session: SessionStore<S>,
    tasks: TaskStore,
    notifications: NotificationStore,
    alerts: AlertStore,
    training: TrainingStore,
    employees: EmployeeStore,
    dashboard: DashboardStore,
}

impl<S: KeyValueStorage> AppShell<S> {
    /// Hydrates the session from `storage` and builds empty feature stores
    /// with the default HR route layout.
    pub fn boot(config: AppConfig, storage: S) -> Result<Self, ShellError> {
        let session = SessionStore::hydrate(storage)?;
        let fallback = config.guard_fallback();
        info!(
            "event=shell_boot module=shell status=ok authenticated={} retry={} stale_time_ms={}",
            session.is_authenticated(),
            config.query.retry,
            config.query.stale_time_ms
        );

        Ok(Self {
            config,
            fallback,
            routes: RouteTable::hr_defaults(),
            session,
            tasks: TaskStore::tasks(),
            notifications: NotificationStore::notifications(),
            alerts: AlertStore::alerts(),
            training: TrainingStore::training(),
            employees: EmployeeStore::employees(),
            dashboard: DashboardStore::new(),
        })
    }

    /// Replaces the route table.
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Guard decision for navigating to `path`.
    pub fn navigate(&self, path: &str) -> GuardDecision {
        self.routes.check(self.session.session(), path, &self.fallback)
    }

    /// Verifies credentials, issues an opaque bearer token and logs in.
    ///
    /// Feature stores are cleared and in-flight fetches invalidated before the
    /// new session starts, even when the same identity signs in again.
    pub fn sign_in<R: AccountRepository>(
        &mut self,
        accounts: &AccountService<R>,
        email: &str,
        password: &str,
    ) -> Result<Identity, ShellError> {
        let identity = accounts.authenticate(email, password)?;
        let token = Uuid::new_v4().to_string();
        self.reset_stores();
        self.session.login(identity.clone(), token)?;
        Ok(identity)
    }

    /// Logs out and clears all feature state.
    ///
    /// Stores are cleared even when persisting the logout fails.
    pub fn sign_out(&mut self) -> Result<(), ShellError> {
        self.reset_stores();
        self.session.logout()?;
        Ok(())
    }

    /// Invalidates every in-flight fetch, e.g. on navigation away.
    pub fn cancel_fetches(&mut self) {
        self.tasks.cancel_fetches();
        self.notifications.cancel_fetches();
        self.alerts.cancel_fetches();
        self.training.cancel_fetches();
        self.employees.cancel_fetches();
        self.dashboard.cancel_fetches();
    }

    fn reset_stores(&mut self) {
        self.tasks.reset();
        self.notifications.reset();
        self.alerts.reset();
        self.training.reset();
        self.employees.reset();
        self.dashboard.reset();
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn query_policy(&self) -> &QueryPolicy {
        &self.config.query
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.config.theme
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore<S> {
        &mut self.session
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskStore {
        &mut self.tasks
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationStore {
        &mut self.notifications
    }

    pub fn alerts(&self) -> &AlertStore {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut AlertStore {
        &mut self.alerts
    }

    pub fn training(&self) -> &TrainingStore {
        &self.training
    }

    pub fn training_mut(&mut self) -> &mut TrainingStore {
        &mut self.training
    }

    pub fn employees(&self) -> &EmployeeStore {
        &self.employees
    }

    pub fn employees_mut(&mut self) -> &mut EmployeeStore {
        &mut self.employees
    }

    pub fn dashboard(&self) -> &DashboardStore {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut DashboardStore {
        &mut self.dashboard
    }
}
