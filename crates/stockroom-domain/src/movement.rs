//! Movement kinds and the per-state stock buckets they act on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Direction of a stock movement.
///
/// Wire format: `"entrada"` (entry) / `"salida"` (exit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    #[serde(rename = "entrada")]
    Entry,
    #[serde(rename = "salida")]
    Exit,
}

impl MovementType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entrada",
            Self::Exit => "salida",
        }
    }

    /// Signed change this movement applies to its bucket.
    pub fn delta(self, quantity: i32) -> i32 {
        match self {
            Self::Entry => quantity,
            Self::Exit => -quantity,
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entrada" => Ok(Self::Entry),
            "salida" => Ok(Self::Exit),
            other => Err(ValidationError::InvalidMovementType(other.to_owned())),
        }
    }
}

/// Condition bucket a unit of stock is counted in.
///
/// Wire format: `"nuevo"` / `"usado"` / `"dañado"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockState {
    #[serde(rename = "nuevo")]
    New,
    #[serde(rename = "usado")]
    Used,
    #[serde(rename = "dañado")]
    Damaged,
}

impl StockState {
    pub const ALL: [StockState; 3] = [Self::New, Self::Used, Self::Damaged];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "nuevo",
            Self::Used => "usado",
            Self::Damaged => "dañado",
        }
    }
}

impl fmt::Display for StockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStockState(s.to_owned()))
    }
}
