//! Per-state stock counters and the rules that keep them consistent.
//!
//! A product tracks three independent buckets (new, used, damaged). `total` is never
//! adjusted on its own: it is always the sum of the buckets, and every constructor and
//! mutation here re-establishes that.

use serde::{Deserialize, Serialize};

use crate::movement::{MovementType, StockState};
use crate::validation::ValidationError;

/// Quantity counters of a single product. Invariant: `total == new + used + damaged`,
/// and no counter is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    total: i32,
    new: i32,
    used: i32,
    damaged: i32,
}

/// An exit asked for more units than the selected bucket holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not enough {state} stock: {available} available, {requested} requested")]
pub struct InsufficientStock {
    pub state: StockState,
    pub available: i32,
    pub requested: i32,
}

/// Why a movement could not be applied to a product's counters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StockError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Insufficient(#[from] InsufficientStock),
}

impl StockLevels {
    /// Build counters from caller-supplied values, rejecting negatives and an unbalanced total.
    pub fn new(total: i32, new: i32, used: i32, damaged: i32) -> Result<Self, ValidationError> {
        if total < 0 || new < 0 || used < 0 || damaged < 0 {
            return Err(ValidationError::NegativeQuantity);
        }
        let sum = new
            .checked_add(used)
            .and_then(|s| s.checked_add(damaged))
            .ok_or(ValidationError::QuantityOverflow)?;
        if sum != total {
            return Err(ValidationError::UnbalancedQuantities { total, sum });
        }
        Ok(Self {
            total,
            new,
            used,
            damaged,
        })
    }

    /// Counters with every bucket at zero.
    pub fn empty() -> Self {
        Self {
            total: 0,
            new: 0,
            used: 0,
            damaged: 0,
        }
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn new_count(&self) -> i32 {
        self.new
    }

    pub fn used_count(&self) -> i32 {
        self.used
    }

    pub fn damaged_count(&self) -> i32 {
        self.damaged
    }

    pub fn count(&self, state: StockState) -> i32 {
        match state {
            StockState::New => self.new,
            StockState::Used => self.used,
            StockState::Damaged => self.damaged,
        }
    }

    /// Check that an exit of `quantity` units from `state` is covered.
    pub fn ensure_available(
        &self,
        state: StockState,
        quantity: i32,
    ) -> Result<(), InsufficientStock> {
        let available = self.count(state);
        if available < quantity {
            return Err(InsufficientStock {
                state,
                available,
                requested: quantity,
            });
        }
        Ok(())
    }

    /// Apply one movement, returning the new counters. `self` is never modified, so a
    /// rejected movement leaves the caller's counters untouched.
    pub fn apply(
        &self,
        kind: MovementType,
        state: StockState,
        quantity: i32,
    ) -> Result<Self, StockError> {
        validate_movement_quantity(quantity)?;
        if kind == MovementType::Exit {
            self.ensure_available(state, quantity)?;
        }
        let updated = self
            .count(state)
            .checked_add(kind.delta(quantity))
            .ok_or(ValidationError::QuantityOverflow)?;

        let mut next = *self;
        match state {
            StockState::New => next.new = updated,
            StockState::Used => next.used = updated,
            StockState::Damaged => next.damaged = updated,
        }
        next.total = next
            .new
            .checked_add(next.used)
            .and_then(|s| s.checked_add(next.damaged))
            .ok_or(ValidationError::QuantityOverflow)?;
        Ok(next)
    }
}

/// Movement quantities are strictly positive.
pub fn validate_movement_quantity(quantity: i32) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::NonPositiveMovementQuantity);
    }
    Ok(())
}

/// Quantity fields of a partial product update. Unsupplied fields keep the product's
/// current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantityPatch {
    pub total: Option<i32>,
    pub new: Option<i32>,
    pub used: Option<i32>,
    pub damaged: Option<i32>,
}

impl QuantityPatch {
    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.new.is_none() && self.used.is_none() && self.damaged.is_none()
    }

    /// Merge supplied values over `current` and re-check the invariant.
    ///
    /// Returns `Ok(None)` when no quantity field was supplied.
    pub fn merge(&self, current: &StockLevels) -> Result<Option<StockLevels>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        StockLevels::new(
            self.total.unwrap_or(current.total),
            self.new.unwrap_or(current.new),
            self.used.unwrap_or(current.used),
            self.damaged.unwrap_or(current.damaged),
        )
        .map(Some)
    }
}
