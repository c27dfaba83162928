use anyhow::Context as _;

use stockroom_auth_types::session::SessionManager;

use crate::domain::repository::{AccountRepository, CredentialHasher};
use crate::domain::types::Account;
use crate::error::InventoryServiceError;

// ── Authenticate ─────────────────────────────────────────────────────────────

/// Verify a username/password pair. Unknown usernames and wrong passwords fail the same
/// way so callers cannot probe for accounts.
pub struct AuthenticateUseCase<R: AccountRepository, H: CredentialHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: AccountRepository, H: CredentialHasher> AuthenticateUseCase<R, H> {
    pub async fn execute(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, InventoryServiceError> {
        match self.repo.find_by_username(username).await? {
            Some(account) if self.hasher.verify(password, &account.password_hash) => Ok(account),
            _ => {
                tracing::info!(username, "login rejected");
                Err(InventoryServiceError::InvalidCredentials)
            }
        }
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

/// Authenticate, then start a session for the account.
pub struct LoginUseCase<'a, R: AccountRepository, H: CredentialHasher> {
    pub authenticate: AuthenticateUseCase<R, H>,
    pub sessions: &'a SessionManager,
}

impl<R: AccountRepository, H: CredentialHasher> LoginUseCase<'_, R, H> {
    pub async fn execute(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, InventoryServiceError> {
        let account = self.authenticate.execute(username, password).await?;
        let token = self
            .sessions
            .issue(&account.username)
            .context("issue session token")?;
        tracing::info!(username = %account.username, "session started");
        Ok(token)
    }
}
