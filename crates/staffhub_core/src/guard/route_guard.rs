//! Route guard decision function.
//!
//! # Responsibility
//! - Decide `Allow` or `Redirect` for one navigation.
//!
//! # Invariants
//! - Pure function of session + requirement + fallback paths; no state.
//! - Unauthenticated sessions never pass a non-public requirement.
//! - Authentication does not imply authorization: a missing role or a role
//!   outside the allow-list is denied.
//! - An empty allow-list denies everyone.

use crate::model::role::Role;
use crate::model::session::Session;
use log::debug;
use std::collections::BTreeSet;

/// Access requirement attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteRequirement {
    Public,
    Authenticated,
    AnyRole(BTreeSet<Role>),
}

impl RouteRequirement {
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::AnyRole(roles.into_iter().collect())
    }
}

/// Guard outcome for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Redirect(path) => Some(path.as_str()),
        }
    }
}

/// Redirect destinations used when the guard denies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardFallback {
    /// Used when no session is active.
    pub login_path: String,
    /// Used when the session lacks an allowed role.
    pub unauthorized_path: String,
}

pub const DEFAULT_LOGIN_PATH: &str = "/login";

impl Default for GuardFallback {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            unauthorized_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

/// Evaluates `requirement` against `session`.
pub fn evaluate(
    session: &Session,
    requirement: &RouteRequirement,
    fallback: &GuardFallback,
) -> GuardDecision {
    match requirement {
        RouteRequirement::Public => GuardDecision::Allow,
        _ if !session.is_authenticated() => {
            debug!("event=route_guard module=guard status=redirect reason=unauthenticated");
            GuardDecision::Redirect(fallback.login_path.clone())
        }
        RouteRequirement::Authenticated => GuardDecision::Allow,
        RouteRequirement::AnyRole(allowed) => match session.role() {
            Some(role) if allowed.contains(&role) => GuardDecision::Allow,
            role => {
                debug!(
                    "event=route_guard module=guard status=redirect reason=role_denied role={}",
                    role.map_or("none", Role::as_str)
                );
                GuardDecision::Redirect(fallback.unauthorized_path.clone())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate, GuardDecision, GuardFallback, RouteRequirement};
    use crate::model::role::Role;
    use crate::model::session::{Identity, Session};
    use std::collections::BTreeSet;

    fn session_with(role: Option<Role>) -> Session {
        let mut identity = Identity::new("u-1", "a@example.com", "A", Role::Employee);
        identity.role = role;
        Session::authenticated(identity, "token")
    }

    #[test]
    fn unauthenticated_is_redirected_for_every_protected_requirement() {
        let fallback = GuardFallback::default();
        let session = Session::signed_out();
        let requirements = [
            RouteRequirement::Authenticated,
            RouteRequirement::any_of(Role::ALL),
            RouteRequirement::AnyRole(BTreeSet::new()),
        ];
        for requirement in &requirements {
            assert_eq!(
                evaluate(&session, requirement, &fallback),
                GuardDecision::Redirect("/login".to_string())
            );
        }
        assert!(evaluate(&session, &RouteRequirement::Public, &fallback).is_allowed());
    }

    #[test]
    fn manager_is_allowed_only_when_listed() {
        let fallback = GuardFallback::default();
        let session = session_with(Some(Role::Manager));

        let owner_only = RouteRequirement::any_of([Role::Owner]);
        assert_eq!(
            evaluate(&session, &owner_only, &fallback),
            GuardDecision::Redirect("/login".to_string())
        );

        let managers = RouteRequirement::any_of([Role::Manager, Role::Owner]);
        assert_eq!(evaluate(&session, &managers, &fallback), GuardDecision::Allow);
    }

    #[test]
    fn authenticated_without_role_is_denied_role_routes() {
        let fallback = GuardFallback {
            login_path: "/login".to_string(),
            unauthorized_path: "/forbidden".to_string(),
        };
        let session = session_with(None);

        assert!(evaluate(&session, &RouteRequirement::Authenticated, &fallback).is_allowed());
        let decision = evaluate(&session, &RouteRequirement::any_of(Role::ALL), &fallback);
        assert_eq!(decision.redirect_target(), Some("/forbidden"));
    }

    #[test]
    fn empty_allow_list_denies_everyone() {
        let fallback = GuardFallback::default();
        let session = session_with(Some(Role::SuperAdmin));
        let nobody = RouteRequirement::AnyRole(BTreeSet::new());
        assert!(!evaluate(&session, &nobody, &fallback).is_allowed());
    }
}
