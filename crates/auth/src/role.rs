use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role held by a user within an organization membership.
///
/// The domain is closed: a `Role` value outside this set cannot be
/// constructed. Roles are immutable once assigned to a membership; this crate
/// only ever reads them. Wire values use the SCREAMING_CASE names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Organization administrator.
    Admin,
    /// Regular organization member.
    Member,
    /// Billing-only seat.
    Billing,
}

/// A role value outside the enumerated domain.
///
/// Produced at the boundaries where roles arrive as strings (token claims,
/// route parameters, stored memberships). Fatal to the current request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid role: '{0}'")]
pub struct InvalidRoleError(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Member, Role::Billing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
            Role::Billing => "BILLING",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "MEMBER" => Ok(Role::Member),
            "BILLING" => Ok(Role::Billing),
            other => Err(InvalidRoleError(other.to_string())),
        }
    }
}
