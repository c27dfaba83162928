use stockroom_domain::account::{Role, require_role};

use crate::domain::repository::AccountRepository;
use crate::domain::types::Account;
use crate::error::InventoryServiceError;

/// Resolve the session subject to its account and check its role.
///
/// A subject whose account no longer exists is treated as unauthenticated.
pub struct AuthorizeUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> AuthorizeUseCase<R> {
    pub async fn execute(
        &self,
        username: &str,
        required: Role,
    ) -> Result<Account, InventoryServiceError> {
        let account = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(InventoryServiceError::Unauthenticated)?;
        if let Err(denied) = require_role(account.role, required) {
            tracing::info!(username, required = %denied.required, "role check failed");
            return Err(denied.into());
        }
        Ok(account)
    }
}
