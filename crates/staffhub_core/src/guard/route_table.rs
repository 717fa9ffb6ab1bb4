//! Route configuration: path patterns mapped to access requirements.
//!
//! # Invariants
//! - Patterns start with `/`; prefix patterns end with `/*`.
//! - Exact patterns win over prefixes; among prefixes the longest wins.
//! - Paths without a matching pattern are public.

use crate::guard::route_guard::{evaluate, GuardDecision, GuardFallback, RouteRequirement};
use crate::model::role::Role;
use crate::model::session::Session;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PUBLIC: RouteRequirement = RouteRequirement::Public;

/// Route table registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    InvalidPattern(String),
    DuplicatePattern(String),
}

impl Display for RouteTableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern(value) => write!(f, "route pattern is invalid: {value}"),
            Self::DuplicatePattern(value) => write!(f, "route pattern already registered: {value}"),
        }
    }
}

impl Error for RouteTableError {}

/// Route pattern registry consulted on every navigation.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    exact: BTreeMap<String, RouteRequirement>,
    prefixes: BTreeMap<String, RouteRequirement>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route layout of the employee, manager, owner and admin apps.
    pub fn hr_defaults() -> Self {
        let mut table = Self::new();
        let entries = [
            ("/login", RouteRequirement::Public),
            ("/", RouteRequirement::Authenticated),
            ("/tasks/*", RouteRequirement::Authenticated),
            ("/notifications/*", RouteRequirement::Authenticated),
            ("/training/*", RouteRequirement::Authenticated),
            ("/profile/*", RouteRequirement::Authenticated),
            (
                "/manager/*",
                RouteRequirement::any_of([Role::Manager, Role::Owner, Role::SuperAdmin]),
            ),
            (
                "/employees/*",
                RouteRequirement::any_of([Role::Manager, Role::Owner, Role::SuperAdmin]),
            ),
            (
                "/alerts/*",
                RouteRequirement::any_of([Role::Manager, Role::Owner, Role::SuperAdmin]),
            ),
            (
                "/dashboard/*",
                RouteRequirement::any_of([Role::Manager, Role::Owner, Role::SuperAdmin]),
            ),
            (
                "/owner/*",
                RouteRequirement::any_of([Role::Owner, Role::SuperAdmin]),
            ),
            ("/admin/*", RouteRequirement::any_of([Role::SuperAdmin])),
        ];
        for (pattern, requirement) in entries {
            let registered = table.protect(pattern, requirement);
            debug_assert!(registered.is_ok(), "default route `{pattern}` rejected");
        }
        table
    }

    /// Registers `requirement` for `pattern`.
    pub fn protect(
        &mut self,
        pattern: &str,
        requirement: RouteRequirement,
    ) -> Result<(), RouteTableError> {
        let trimmed = pattern.trim();
        if !trimmed.starts_with('/') || trimmed.contains(['?', '#']) {
            return Err(RouteTableError::InvalidPattern(pattern.to_string()));
        }

        let (target, key) = match trimmed.strip_suffix("/*") {
            Some(prefix) => (&mut self.prefixes, normalize_path(prefix)),
            None if trimmed.contains('*') => {
                return Err(RouteTableError::InvalidPattern(pattern.to_string()));
            }
            None => (&mut self.exact, normalize_path(trimmed)),
        };
        if target.contains_key(&key) {
            return Err(RouteTableError::DuplicatePattern(pattern.to_string()));
        }
        target.insert(key, requirement);
        Ok(())
    }

    /// Requirement governing `path`.
    pub fn requirement_for(&self, path: &str) -> &RouteRequirement {
        let path = normalize_path(path);
        if let Some(requirement) = self.exact.get(&path) {
            return requirement;
        }

        self.prefixes
            .iter()
            .filter(|(prefix, _)| is_under(&path, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map_or(&PUBLIC, |(_, requirement)| requirement)
    }

    /// Guards navigation to `path`.
    pub fn check(&self, session: &Session, path: &str, fallback: &GuardFallback) -> GuardDecision {
        evaluate(session, self.requirement_for(path), fallback)
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.prefixes.is_empty()
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_under(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}
