use chrono::{DateTime, NaiveDate, Utc};

use stockroom_domain::account::Role;
use stockroom_domain::location::Location;
use stockroom_domain::movement::{MovementType, StockState};
use stockroom_domain::stock::{QuantityPatch, StockLevels};

/// Login identity. `password_hash` is an opaque verifier string.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Profile data stored one-to-one with an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetails {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

/// An account together with its details. Accounts created before details existed
/// may have none.
#[derive(Debug, Clone)]
pub struct AccountProfile {
    pub account: Account,
    pub details: Option<AccountDetails>,
}

/// Insert payload for an account and its details, written atomically.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub details: AccountDetails,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub location: Location,
    pub stock: StockLevels,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub location: Location,
    pub stock: StockLevels,
}

/// Validated partial update. `None` leaves the column untouched.
///
/// `quantities` is merged over the counters read under the product's row lock, so a
/// concurrent movement is never overwritten by stale values.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub location: Option<Location>,
    pub quantities: QuantityPatch,
}

/// A recorded ledger entry. Never updated once written.
#[derive(Debug, Clone)]
pub struct Movement {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub product_code: String,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub state: StockState,
    pub responsible: String,
    pub recorded_by: String,
    pub notes: Option<String>,
    pub product_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewMovement {
    pub product_code: String,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub state: StockState,
    pub responsible: String,
    pub recorded_by: String,
    pub notes: Option<String>,
}

/// Movement listing filters. Code and responsible party match as SQL `LIKE '%value%'`,
/// so `%` and `_` act as wildcards. Timestamp bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    pub product_code: Option<String>,
    pub movement_type: Option<MovementType>,
    pub responsible: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
