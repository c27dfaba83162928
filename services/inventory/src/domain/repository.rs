#![allow(async_fn_in_trait)]

use crate::domain::types::{
    Account, AccountDetails, AccountProfile, Movement, MovementFilter, NewAccount, NewMovement,
    NewProduct, Product, ProductChanges,
};
use crate::error::InventoryServiceError;

/// Repository for accounts and their details.
pub trait AccountRepository: Send + Sync {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, InventoryServiceError>;

    async fn find_profile(&self, id: i32) -> Result<Option<AccountProfile>, InventoryServiceError>;

    async fn list_profiles(&self) -> Result<Vec<AccountProfile>, InventoryServiceError>;

    /// Insert the account and its details in one transaction. A taken username fails with
    /// `ValidationError::DuplicateUsername`.
    async fn create(&self, account: &NewAccount) -> Result<AccountProfile, InventoryServiceError>;

    /// Upsert the details and, when given, replace the password hash. Returns `false` when
    /// the account does not exist.
    async fn update_profile(
        &self,
        id: i32,
        details: &AccountDetails,
        password_hash: Option<&str>,
    ) -> Result<bool, InventoryServiceError>;

    /// Delete the account and its details. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, InventoryServiceError>;
}

/// Repository for product records.
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, InventoryServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, InventoryServiceError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, InventoryServiceError>;

    /// A taken code fails with `ValidationError::DuplicateCode`.
    async fn create(&self, product: &NewProduct) -> Result<Product, InventoryServiceError>;

    /// Apply the changes and refresh `updated_at` under the product's row lock. Supplied
    /// quantities are merged over the locked counters and must still balance. Returns `None`
    /// when the product does not exist.
    async fn update(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, InventoryServiceError>;

    /// Returns `true` if a row was deleted. Fails with `ProductInUse` when movements
    /// reference the product.
    async fn delete(&self, id: i32) -> Result<bool, InventoryServiceError>;

    async fn has_movements(&self, id: i32) -> Result<bool, InventoryServiceError>;

    /// Distinct non-empty categories, sorted.
    async fn categories(&self) -> Result<Vec<String>, InventoryServiceError>;
}

/// Repository for the movement ledger.
pub trait MovementRepository: Send + Sync {
    /// Append the movement and apply it to the product's counters atomically.
    ///
    /// Fails with `ProductNotFound` for an unknown code and `InsufficientStock` when an
    /// exit exceeds the selected bucket; in both cases nothing is written.
    async fn record(&self, movement: &NewMovement) -> Result<Movement, InventoryServiceError>;

    /// Matching movements, most recent first.
    async fn list(&self, filter: &MovementFilter) -> Result<Vec<Movement>, InventoryServiceError>;
}

/// Credential verifier. Hashes are opaque strings.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, InventoryServiceError>;

    /// `false` for a wrong password or an unreadable hash.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}
