//! Identity and session model.
//!
//! # Responsibility
//! - Define the authenticated identity summary held client-side.
//! - Define the session shape persisted across reloads.
//!
//! # Invariants
//! - `Session::is_authenticated()` is true iff both identity and token exist.
//! - Persisted payloads that violate the invariant are rejected on decode.

use crate::model::role::Role;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Authenticated user's profile summary and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    /// `None` when the payload carries no role. An unknown role string fails
    /// decoding of the whole identity.
    #[serde(default)]
    pub role: Option<Role>,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role: Some(role),
        }
    }
}

/// Partial profile update applied to the current identity.
///
/// The role is intentionally absent: profile edits never change authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Identity, bearer credential and authentication flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    token: Option<String>,
}

impl Session {
    /// Signed-out steady state.
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            identity: Some(identity),
            token: Some(token.into()),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().and_then(|identity| identity.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some() && self.token.is_some()
    }

    pub(crate) fn identity_mut(&mut self) -> Option<&mut Identity> {
        self.identity.as_mut()
    }

    /// Converts into the persisted wire shape.
    pub fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            identity: self.identity.clone(),
            token: self.token.clone(),
            is_authenticated: self.is_authenticated(),
        }
    }
}

/// Serialized session shape stored under the session storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub identity: Option<Identity>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl PersistedSession {
    /// Validates the flag against identity/token presence.
    ///
    /// A half-populated payload (identity without token or vice versa) is
    /// rejected even when its flag is `false`.
    pub fn into_session(self) -> Result<Session, SessionDecodeError> {
        let complete = self.identity.is_some() && self.token.is_some();
        let empty = self.identity.is_none() && self.token.is_none();

        if self.is_authenticated != complete {
            return Err(SessionDecodeError::FlagMismatch {
                is_authenticated: self.is_authenticated,
            });
        }
        if !complete && !empty {
            return Err(SessionDecodeError::PartialSession);
        }

        Ok(Session {
            identity: self.identity,
            token: self.token,
        })
    }
}

/// Persisted session payload decode errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionDecodeError {
    FlagMismatch { is_authenticated: bool },
    PartialSession,
}

impl Display for SessionDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlagMismatch { is_authenticated } => write!(
                f,
                "persisted session flag is_authenticated={is_authenticated} \
                 disagrees with identity/token presence"
            ),
            Self::PartialSession => {
                write!(f, "persisted session has only one of identity and token")
            }
        }
    }
}

impl Error for SessionDecodeError {}
