//! Account seeding and credential verification.
//!
//! # Responsibility
//! - Seed the initial super-admin account.
//! - Verify email/password pairs and produce the matching `Identity`.
//!
//! # Invariants
//! - Passwords are stored only as salted Argon2id PHC strings.
//! - Verification always goes through the stored hash; plaintext is never
//!   compared or persisted.
//! - Unknown email and wrong password are indistinguishable to callers.

use crate::model::role::Role;
use crate::model::session::Identity;
use crate::repo::account_repo::{Account, AccountRepository, RepoError};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Verified against when no account matches, so both denial paths pay for Argon2.
static UNKNOWN_ACCOUNT_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("staffhub-unknown-account").ok());

/// Service error for seeding and authentication.
#[derive(Debug)]
pub enum AccountError {
    InvalidEmail,
    EmptyName,
    WeakPassword { min_chars: usize },
    InvalidCredentials,
    Hashing(String),
    Repo(RepoError),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email address is invalid"),
            Self::EmptyName => write!(f, "account name must not be empty"),
            Self::WeakPassword { min_chars } => {
                write!(f, "password must have at least {min_chars} characters")
            }
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Hashing(message) => write!(f, "password hashing failed: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AccountError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of `seed_admin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(Identity),
    /// An account with this email already existed; nothing was written.
    AlreadyExists(Identity),
}

impl SeedOutcome {
    pub fn identity(&self) -> &Identity {
        match self {
            Self::Created(identity) | Self::AlreadyExists(identity) => identity,
        }
    }
}

/// Use-case service over an account repository.
pub struct AccountService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates the super-admin account unless one with `email` exists.
    ///
    /// # Errors
    /// - Validation errors for malformed email, blank name or short password.
    /// - `Hashing` when the hasher fails; repository errors unchanged.
    pub fn seed_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<SeedOutcome, AccountError> {
        self.create_account(email, name, password, Role::SuperAdmin)
    }

    /// Creates one account with `role`. Existing emails are left untouched.
    pub fn create_account(
        &self,
        email: &str,
        name: &str,
        password: &str,
        role: Role,
    ) -> Result<SeedOutcome, AccountError> {
        let email = normalize_email(email)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountError::EmptyName);
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AccountError::WeakPassword {
                min_chars: MIN_PASSWORD_CHARS,
            });
        }

        if let Some(existing) = self.repo.find_by_email(&email)? {
            info!(
                "event=account_seed module=account status=skipped reason=exists role={}",
                existing.role
            );
            return Ok(SeedOutcome::AlreadyExists(identity_of(&existing)));
        }

        let account = Account {
            id: Uuid::new_v4(),
            email,
            name: name.to_string(),
            role,
            password_hash: hash_password(password)?,
            created_at: now_epoch_ms(),
        };
        self.repo.create_account(&account)?;
        info!(
            "event=account_seed module=account status=ok role={}",
            account.role
        );
        Ok(SeedOutcome::Created(identity_of(&account)))
    }

    /// Verifies credentials and returns the account identity.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AccountError> {
        let account = match normalize_email(email) {
            Ok(email) => self.repo.find_by_email(&email)?,
            Err(_) => None,
        };
        let Some(account) = account else {
            verify_unknown_account(password);
            warn!("event=account_auth module=account status=denied");
            return Err(AccountError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash)? {
            warn!("event=account_auth module=account status=denied");
            return Err(AccountError::InvalidCredentials);
        }

        info!(
            "event=account_auth module=account status=ok role={}",
            account.role
        );
        Ok(identity_of(&account))
    }

    pub fn has_admin(&self) -> Result<bool, AccountError> {
        Ok(self.repo.count_by_role(Role::SuperAdmin)? > 0)
    }
}

/// Hashes `password` with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AccountError::Hashing(err.to_string()))
}

/// Checks `password` against a stored PHC hash string.
///
/// Returns `Ok(false)` for a mismatch and an error for a malformed hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AccountError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|err| AccountError::Hashing(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn verify_unknown_account(password: &str) {
    if let Some(hash) = UNKNOWN_ACCOUNT_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

fn normalize_email(email: &str) -> Result<String, AccountError> {
    let normalized = email.trim().to_ascii_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(AccountError::InvalidEmail);
    }
    Ok(normalized)
}

fn identity_of(account: &Account) -> Identity {
    Identity::new(
        account.id.to_string(),
        account.email.clone(),
        account.name.clone(),
        account.role,
    )
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
