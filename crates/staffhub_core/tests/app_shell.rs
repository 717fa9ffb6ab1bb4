use staffhub_core::db::open_db_in_memory;
use staffhub_core::model::notification::Notification;
use staffhub_core::model::task::{Task, TaskStatus};
use staffhub_core::{
    AccountService, AppConfig, AppShell, FetchOutcome, GuardDecision, KeyValueStorage,
    MemoryKeyValueStorage, Role, RouteRequirement, RouteTable, SqliteAccountRepository,
    SqliteKeyValueStorage, StorageError, StorageResult,
};
use std::cell::Cell;

/// Memory storage whose writes can be switched to fail.
#[derive(Default)]
struct FailingWrites {
    inner: MemoryKeyValueStorage,
    fail: Cell<bool>,
}

impl KeyValueStorage for FailingWrites {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail.get() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove(key)
    }
}

#[test]
fn navigation_follows_session_role() {
    let conn = open_db_in_memory().unwrap();
    let accounts = AccountService::new(SqliteAccountRepository::new(&conn));
    accounts
        .create_account("lead@example.com", "Team Lead", "lead-pass-1", Role::Manager)
        .unwrap();

    let storage = MemoryKeyValueStorage::new();
    let mut shell = AppShell::boot(AppConfig::default(), &storage).unwrap();
    assert_eq!(
        shell.navigate("/manager/team"),
        GuardDecision::Redirect("/login".to_string())
    );

    let identity = shell
        .sign_in(&accounts, "lead@example.com", "lead-pass-1")
        .unwrap();
    assert_eq!(identity.role, Some(Role::Manager));
    assert!(shell.session().token().is_some());

    assert_eq!(shell.navigate("/manager/team"), GuardDecision::Allow);
    assert!(!shell.navigate("/owner").is_allowed());
    assert!(!shell.navigate("/admin/tenants").is_allowed());
    assert!(shell.navigate("/tasks").is_allowed());
}

#[test]
fn anonymous_users_cannot_open_staff_screens() {
    let storage = MemoryKeyValueStorage::new();
    let shell = AppShell::boot(AppConfig::default(), &storage).unwrap();
    for path in ["/employees", "/alerts", "/dashboard/attendance"] {
        assert_eq!(
            shell.navigate(path),
            GuardDecision::Redirect("/login".to_string())
        );
    }
}

#[test]
fn failed_sign_in_leaves_session_signed_out() {
    let conn = open_db_in_memory().unwrap();
    let accounts = AccountService::new(SqliteAccountRepository::new(&conn));
    accounts
        .seed_admin("admin@example.com", "Admin", "admin-pass-1")
        .unwrap();

    let storage = MemoryKeyValueStorage::new();
    let mut shell = AppShell::boot(AppConfig::default(), &storage).unwrap();
    assert!(shell
        .sign_in(&accounts, "admin@example.com", "wrong-pass")
        .is_err());
    assert!(!shell.session().is_authenticated());
    assert!(storage.is_empty());
}

#[test]
fn sign_out_clears_stores_and_discards_inflight_fetches() {
    let conn = open_db_in_memory().unwrap();
    let accounts = AccountService::new(SqliteAccountRepository::new(&conn));
    accounts
        .seed_admin("admin@example.com", "Admin", "admin-pass-1")
        .unwrap();

    let mut shell =
        AppShell::boot(AppConfig::default(), SqliteKeyValueStorage::new(&conn)).unwrap();
    shell
        .sign_in(&accounts, "admin@example.com", "admin-pass-1")
        .unwrap();

    shell
        .tasks_mut()
        .set_records(vec![Task::new("1", "Review payroll")]);
    shell
        .notifications_mut()
        .set_records(vec![Notification::new("n-1", "Welcome", 0)]);
    let pending = shell.tasks_mut().begin_fetch();

    shell.sign_out().unwrap();

    assert!(!shell.session().is_authenticated());
    assert!(shell.tasks().is_empty());
    assert_eq!(shell.notifications().unread_count(), 0);
    assert_eq!(
        shell
            .tasks_mut()
            .complete_fetch(pending, Ok(vec![Task::new("2", "Leaked")]), 10),
        FetchOutcome::Stale
    );
    assert!(shell.tasks().is_empty());
    assert_eq!(
        shell.navigate("/"),
        GuardDecision::Redirect("/login".to_string())
    );
}

#[test]
fn switching_users_clears_previous_records_and_fetches() {
    let conn = open_db_in_memory().unwrap();
    let accounts = AccountService::new(SqliteAccountRepository::new(&conn));
    accounts
        .create_account("owner@example.com", "Owner", "owner-pass-1", Role::Owner)
        .unwrap();
    accounts
        .create_account("emp@example.com", "Emp", "emp-pass-1", Role::Employee)
        .unwrap();

    let storage = MemoryKeyValueStorage::new();
    let mut shell = AppShell::boot(AppConfig::default(), &storage).unwrap();
    shell
        .sign_in(&accounts, "owner@example.com", "owner-pass-1")
        .unwrap();
    shell
        .tasks_mut()
        .set_records(vec![Task::new("1", "Owner-only review")]);
    let pending = shell.tasks_mut().begin_fetch();

    let identity = shell
        .sign_in(&accounts, "emp@example.com", "emp-pass-1")
        .unwrap();
    assert_eq!(identity.role, Some(Role::Employee));
    assert!(shell.tasks().is_empty());
    assert!(!shell.tasks().is_loading());
    assert_eq!(
        shell
            .tasks_mut()
            .complete_fetch(pending, Ok(vec![Task::new("2", "Owner data")]), 10),
        FetchOutcome::Stale
    );
    assert!(shell.tasks().is_empty());
}

#[test]
fn sign_out_clears_stores_when_persisting_fails() {
    let conn = open_db_in_memory().unwrap();
    let accounts = AccountService::new(SqliteAccountRepository::new(&conn));
    accounts
        .seed_admin("admin@example.com", "Admin", "admin-pass-1")
        .unwrap();

    let storage = FailingWrites::default();
    let mut shell = AppShell::boot(AppConfig::default(), &storage).unwrap();
    shell
        .sign_in(&accounts, "admin@example.com", "admin-pass-1")
        .unwrap();
    shell
        .tasks_mut()
        .set_records(vec![Task::new("1", "Review payroll")]);
    let pending = shell.tasks_mut().begin_fetch();

    storage.fail.set(true);
    assert!(shell.sign_out().is_err());

    assert!(!shell.session().is_authenticated());
    assert!(shell.tasks().is_empty());
    assert_eq!(
        shell
            .tasks_mut()
            .complete_fetch(pending, Ok(vec![Task::new("2", "Leaked")]), 10),
        FetchOutcome::Stale
    );
}

#[test]
fn refresh_uses_configured_retry_budget() {
    let config = AppConfig::from_json_str(r#"{"query":{"retry":2}}"#).unwrap();
    let storage = MemoryKeyValueStorage::new();
    let mut shell = AppShell::boot(config, &storage).unwrap();

    let attempts = Cell::new(0);
    let flaky = || {
        attempts.set(attempts.get() + 1);
        if attempts.get() <= 2 {
            Err("gateway timeout".to_string())
        } else {
            Ok(vec![Task::new("1", "a").with_status(TaskStatus::InProgress)])
        }
    };

    let policy = shell.query_policy().clone();
    let outcome = shell.tasks_mut().refresh(&flaky, &policy, 1_000);

    assert_eq!(outcome, FetchOutcome::Committed);
    assert_eq!(attempts.get(), 3);
    assert_eq!(shell.tasks().stats().in_progress, 1);
    assert_eq!(shell.tasks().last_fetched_at(), Some(1_000));
}

#[test]
fn custom_routes_and_fallbacks_apply() {
    let config =
        AppConfig::from_json_str(r#"{"login_path":"/signin","unauthorized_path":"/403"}"#)
            .unwrap();
    let mut routes = RouteTable::new();
    routes
        .protect("/reports/*", RouteRequirement::any_of([Role::Owner]))
        .unwrap();

    let storage = MemoryKeyValueStorage::new();
    let mut shell = AppShell::boot(config, &storage).unwrap().with_routes(routes);
    assert_eq!(
        shell.navigate("/reports/q3"),
        GuardDecision::Redirect("/signin".to_string())
    );

    shell
        .session_mut()
        .login(
            staffhub_core::Identity::new("u-1", "e@example.com", "Emp", Role::Employee),
            "tok",
        )
        .unwrap();
    assert_eq!(
        shell.navigate("/reports/q3"),
        GuardDecision::Redirect("/403".to_string())
    );
    assert!(shell.navigate("/anything-else").is_allowed());
}
