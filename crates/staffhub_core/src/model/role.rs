//! Role declarations for route authorization.
//!
//! # Responsibility
//! - Define the closed set of roles an identity can hold.
//! - Map roles to and from their stable wire strings.
//!
//! # Invariants
//! - Role strings match by exact comparison; no hierarchy, no wildcards.
//! - Unknown role strings are rejected at parse time, never coerced.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Role held by an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform operator across all tenants.
    SuperAdmin,
    /// Company owner.
    Owner,
    /// Team manager.
    Manager,
    /// Regular employee.
    Employee,
}

/// Wire string for super admin role.
pub const ROLE_SUPER_ADMIN: &str = "SUPER_ADMIN";
/// Wire string for owner role.
pub const ROLE_OWNER: &str = "OWNER";
/// Wire string for manager role.
pub const ROLE_MANAGER: &str = "MANAGER";
/// Wire string for employee role.
pub const ROLE_EMPLOYEE: &str = "EMPLOYEE";

const SUPPORTED_ROLE_STRINGS: &[&str] =
    &[ROLE_SUPER_ADMIN, ROLE_OWNER, ROLE_MANAGER, ROLE_EMPLOYEE];

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::Owner, Role::Manager, Role::Employee];

    /// Stable string id used in persisted sessions and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => ROLE_SUPER_ADMIN,
            Self::Owner => ROLE_OWNER,
            Self::Manager => ROLE_MANAGER,
            Self::Employee => ROLE_EMPLOYEE,
        }
    }
}

/// Returns supported role strings.
pub fn supported_role_strings() -> &'static [&'static str] {
    SUPPORTED_ROLE_STRINGS
}

/// Parses one role from its wire string. No trimming or case folding.
pub fn parse_role(value: &str) -> Result<Role, RoleParseError> {
    if value.is_empty() {
        return Err(RoleParseError::EmptyRole);
    }

    match value {
        ROLE_SUPER_ADMIN => Ok(Role::SuperAdmin),
        ROLE_OWNER => Ok(Role::Owner),
        ROLE_MANAGER => Ok(Role::Manager),
        ROLE_EMPLOYEE => Ok(Role::Employee),
        other => Err(RoleParseError::UnknownRole(other.to_string())),
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_role(s)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    EmptyRole,
    UnknownRole(String),
}

impl Display for RoleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRole => write!(f, "role value must not be empty"),
            Self::UnknownRole(value) => write!(f, "role is unsupported: {value}"),
        }
    }
}

impl Error for RoleParseError {}
