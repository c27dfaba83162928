//! Business-rule violations reported as `ValidationError`.

/// A request was well-formed but broke a business rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid location {0:?}; valid options are: ALMACÉN 1, ALMACÉN 2, SÓTANO")]
    InvalidLocation(String),
    #[error("product code {0:?} already exists")]
    DuplicateCode(String),
    #[error("quantities by state add up to {sum}, not the total {total}")]
    UnbalancedQuantities { total: i32, sum: i32 },
    #[error("quantities cannot be negative")]
    NegativeQuantity,
    #[error("movement quantity must be positive")]
    NonPositiveMovementQuantity,
    #[error("quantity exceeds the supported range")]
    QuantityOverflow,
    #[error("invalid movement type {0:?}")]
    InvalidMovementType(String),
    #[error("invalid stock state {0:?}")]
    InvalidStockState(String),
    #[error("invalid role {0:?}")]
    InvalidRole(String),
    #[error("username {0:?} already exists")]
    DuplicateUsername(String),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("incorrect current password")]
    IncorrectPassword,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Reject blank required text fields.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
