//! Account repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist seeded accounts with their password hashes.
//! - Look accounts up by normalized email.
//!
//! # Invariants
//! - Only password hashes are stored; plaintext never reaches this layer.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::role::{parse_role, Role};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ACCOUNT_SELECT_SQL: &str = "SELECT
    id,
    email,
    name,
    role,
    password_hash,
    created_at
FROM accounts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for account persistence and lookup.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    DuplicateEmail(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateEmail(_) => write!(f, "account email already registered"),
            Self::InvalidData(message) => write!(f, "invalid persisted account data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::DuplicateEmail(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Stored account row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    /// Lowercased, trimmed email.
    pub email: String,
    pub name: String,
    pub role: Role,
    /// PHC-formatted password hash.
    pub password_hash: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Repository interface for account persistence.
pub trait AccountRepository {
    fn create_account(&self, account: &Account) -> RepoResult<Uuid>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>>;
    fn count_by_role(&self, role: Role) -> RepoResult<u64>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn create_account(&self, account: &Account) -> RepoResult<Uuid> {
        if self.find_by_email(&account.email)?.is_some() {
            return Err(RepoError::DuplicateEmail(account.email.clone()));
        }

        self.conn.execute(
            "INSERT INTO accounts (
                id,
                email,
                name,
                role,
                password_hash,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                account.id.to_string(),
                account.email.as_str(),
                account.name.as_str(),
                account.role.as_str(),
                account.password_hash.as_str(),
                account.created_at,
            ],
        )?;

        Ok(account.id)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let account = self
            .conn
            .query_row(
                &format!("{ACCOUNT_SELECT_SQL} WHERE email = ?1;"),
                [email],
                |row| Ok(parse_account_row(row)),
            )
            .optional()?;
        account.transpose()
    }

    fn count_by_role(&self, role: Role) -> RepoResult<u64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM accounts WHERE role = ?1;",
            [role.as_str()],
            |row| row.get::<_, i64>(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative account count `{count}`")))
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in accounts.id"))
    })?;

    let role_text: String = row.get("role")?;
    let role = parse_role(&role_text).map_err(|err| {
        RepoError::InvalidData(format!("invalid role in accounts.role: {err}"))
    })?;

    Ok(Account {
        id,
        email: row.get("email")?,
        name: row.get("name")?,
        role,
        password_hash: row.get("password_hash")?,
        created_at: row.get("created_at")?,
    })
}
