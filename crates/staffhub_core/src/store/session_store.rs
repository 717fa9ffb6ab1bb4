//! Session store: authenticated identity plus bearer credential.
//!
//! # Responsibility
//! - Own the current `Session`; nothing else mutates it.
//! - Write the session to durable storage on every change.
//! - Rehydrate the session from storage at startup.
//!
//! # Invariants
//! - After `logout`, identity and token are absent and the flag is false.
//! - Undecodable or inconsistent persisted payloads are discarded, never
//!   half-applied.
//! - Tokens and emails never appear in log events.

use crate::model::role::Role;
use crate::model::session::{Identity, IdentityPatch, PersistedSession, Session};
use crate::repo::storage_repo::{KeyValueStorage, StorageError};
use log::{info, warn};
use serde_json::error::Category;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key for the persisted session.
pub const SESSION_STORAGE_KEY: &str = "auth-storage";

pub type SessionResult<T> = Result<T, SessionError>;

/// Session persistence errors.
#[derive(Debug)]
pub enum SessionError {
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "session storage failed: {err}"),
            Self::Encode(err) => write!(f, "session encoding failed: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Session container persisted through a `KeyValueStorage`.
pub struct SessionStore<S: KeyValueStorage> {
    storage: S,
    session: Session,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Reads the persisted session from `storage`.
    ///
    /// Missing payloads yield a signed-out store. Corrupt payloads are logged,
    /// removed from storage and also yield a signed-out store.
    ///
    /// # Errors
    /// - Returns `SessionError::Storage` when the storage read itself fails.
    pub fn hydrate(storage: S) -> SessionResult<Self> {
        let session = match storage.read(SESSION_STORAGE_KEY)? {
            None => Session::signed_out(),
            Some(raw) => match decode_session(&raw) {
                Ok(session) => session,
                Err(reason) => {
                    warn!(
                        "event=session_hydrate module=session status=discarded reason={}",
                        reason
                    );
                    storage.remove(SESSION_STORAGE_KEY)?;
                    Session::signed_out()
                }
            },
        };

        info!(
            "event=session_hydrate module=session status=ok authenticated={} role={}",
            session.is_authenticated(),
            role_label(session.role())
        );
        Ok(Self { storage, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Stores `identity` and `token`. The token format is not validated.
    ///
    /// # Errors
    /// - Persistence failures are returned; the in-memory session is already
    ///   updated when that happens.
    pub fn login(&mut self, identity: Identity, token: impl Into<String>) -> SessionResult<()> {
        let role = identity.role;
        self.session = Session::authenticated(identity, token);
        self.persist()?;
        info!(
            "event=session_login module=session status=ok role={}",
            role_label(role)
        );
        Ok(())
    }

    /// Clears identity and token.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.session = Session::signed_out();
        self.persist()?;
        info!("event=session_logout module=session status=ok");
        Ok(())
    }

    /// Applies profile edits to the current identity.
    ///
    /// Returns `Ok(false)` without writing when signed out.
    pub fn update_identity(&mut self, patch: &IdentityPatch) -> SessionResult<bool> {
        let Some(identity) = self.session.identity_mut() else {
            return Ok(false);
        };
        if let Some(name) = &patch.name {
            identity.name = name.clone();
        }
        if let Some(email) = &patch.email {
            identity.email = email.clone();
        }
        self.persist()?;
        Ok(true)
    }

    /// Returns the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) -> SessionResult<()> {
        let payload = serde_json::to_string(&self.session.to_persisted())?;
        self.storage.write(SESSION_STORAGE_KEY, &payload)?;
        Ok(())
    }
}

fn decode_session(raw: &str) -> Result<Session, String> {
    // Serde messages can echo payload fragments, so only the category is kept.
    let persisted: PersistedSession = serde_json::from_str(raw)
        .map_err(|err| format!("decode_failed:{}", json_error_label(&err)))?;
    persisted
        .into_session()
        .map_err(|err| format!("invariant_violated:{err}"))
}

fn json_error_label(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "data",
        Category::Eof => "eof",
    }
}

fn role_label(role: Option<Role>) -> &'static str {
    role.map_or("none", Role::as_str)
}
