//! Account domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Account permission level.
///
/// Stored and sent on the wire as `"normal"` / `"admin"`. Only these two levels exist;
/// there is no general RBAC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Normal,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Admin => "admin",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Admin => 1,
        }
    }

    /// `true` when this role grants at least the privileges of `required`.
    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "admin" => Ok(Self::Admin),
            other => Err(ValidationError::InvalidRole(other.to_owned())),
        }
    }
}

/// Returned by [`require_role`] when the caller's role is insufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("role {actual} does not satisfy {required}")]
pub struct Forbidden {
    pub required: Role,
    pub actual: Role,
}

/// Authorization gate: a pure comparison of the caller's role against the required one.
pub fn require_role(actual: Role, required: Role) -> Result<(), Forbidden> {
    if actual.satisfies(required) {
        Ok(())
    } else {
        Err(Forbidden { required, actual })
    }
}
