use staffhub_core::db::open_db_in_memory;
use staffhub_core::{AccountError, AccountService, Role, SeedOutcome, SqliteAccountRepository};

#[test]
fn seed_admin_stores_hash_not_plaintext() {
    let conn = open_db_in_memory().unwrap();
    let service = AccountService::new(SqliteAccountRepository::new(&conn));

    let outcome = service
        .seed_admin("Admin@Example.com", "Site Admin", "s3cret-pass")
        .unwrap();
    let identity = match outcome {
        SeedOutcome::Created(identity) => identity,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert_eq!(identity.role, Some(Role::SuperAdmin));
    assert_eq!(identity.email, "admin@example.com");

    let stored: String = conn
        .query_row(
            "SELECT password_hash FROM accounts WHERE email = ?1;",
            ["admin@example.com"],
            |row| row.get(0),
        )
        .unwrap();
    assert_ne!(stored, "s3cret-pass");
    assert!(stored.starts_with("$argon2id$"));
    assert!(service.has_admin().unwrap());
}

#[test]
fn seed_admin_is_idempotent_per_email() {
    let conn = open_db_in_memory().unwrap();
    let service = AccountService::new(SqliteAccountRepository::new(&conn));

    let first = service
        .seed_admin("admin@example.com", "Site Admin", "s3cret-pass")
        .unwrap();
    let second = service
        .seed_admin("admin@example.com", "Someone Else", "another-pass")
        .unwrap();

    assert!(matches!(second, SeedOutcome::AlreadyExists(_)));
    assert_eq!(first.identity(), second.identity());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);

    service
        .authenticate("admin@example.com", "s3cret-pass")
        .expect("original password still valid");
}

#[test]
fn authenticate_rejects_wrong_password_and_unknown_email_alike() {
    let conn = open_db_in_memory().unwrap();
    let service = AccountService::new(SqliteAccountRepository::new(&conn));
    service
        .seed_admin("admin@example.com", "Site Admin", "s3cret-pass")
        .unwrap();

    let identity = service
        .authenticate(" ADMIN@example.com ", "s3cret-pass")
        .unwrap();
    assert_eq!(identity.name, "Site Admin");

    assert!(matches!(
        service.authenticate("admin@example.com", "s3cret-pasS"),
        Err(AccountError::InvalidCredentials)
    ));
    assert!(matches!(
        service.authenticate("nobody@example.com", "s3cret-pass"),
        Err(AccountError::InvalidCredentials)
    ));
}

#[test]
fn seed_validates_input() {
    let conn = open_db_in_memory().unwrap();
    let service = AccountService::new(SqliteAccountRepository::new(&conn));

    assert!(matches!(
        service.seed_admin("not-an-email", "Admin", "long-enough"),
        Err(AccountError::InvalidEmail)
    ));
    assert!(matches!(
        service.seed_admin("a@example.com", "   ", "long-enough"),
        Err(AccountError::EmptyName)
    ));
    assert!(matches!(
        service.seed_admin("a@example.com", "Admin", "short"),
        Err(AccountError::WeakPassword { min_chars: 8 })
    ));
    assert!(!service.has_admin().unwrap());
}

#[test]
fn create_account_assigns_requested_role() {
    let conn = open_db_in_memory().unwrap();
    let service = AccountService::new(SqliteAccountRepository::new(&conn));

    let outcome = service
        .create_account("lead@example.com", "Team Lead", "lead-pass-1", Role::Manager)
        .unwrap();
    assert_eq!(outcome.identity().role, Some(Role::Manager));
    assert!(!service.has_admin().unwrap());
}
