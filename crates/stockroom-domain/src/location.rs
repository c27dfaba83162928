//! Storage locations a product can be assigned to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// One of the fixed storage locations. Any other value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "ALMACÉN 1")]
    Warehouse1,
    #[serde(rename = "ALMACÉN 2")]
    Warehouse2,
    #[serde(rename = "SÓTANO")]
    Basement,
}

impl Location {
    pub const ALL: [Location; 3] = [Self::Warehouse1, Self::Warehouse2, Self::Basement];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warehouse1 => "ALMACÉN 1",
            Self::Warehouse2 => "ALMACÉN 2",
            Self::Basement => "SÓTANO",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidLocation(s.to_owned()))
    }
}
