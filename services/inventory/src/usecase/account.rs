use stockroom_domain::account::Role;
use stockroom_domain::validation::{ValidationError, require_non_empty};

use crate::domain::repository::{AccountRepository, CredentialHasher};
use crate::domain::types::{AccountDetails, AccountProfile, NewAccount};
use crate::error::InventoryServiceError;

fn validate_details(details: &AccountDetails) -> Result<(), ValidationError> {
    require_non_empty("first_name", &details.first_name)?;
    require_non_empty("last_name", &details.last_name)
}

// ── GetOwnProfile ────────────────────────────────────────────────────────────

pub struct GetOwnProfileUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> GetOwnProfileUseCase<R> {
    pub async fn execute(&self, username: &str) -> Result<AccountProfile, InventoryServiceError> {
        let account = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(InventoryServiceError::AccountNotFound)?;
        self.repo
            .find_profile(account.id)
            .await?
            .ok_or(InventoryServiceError::AccountNotFound)
    }
}

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> GetAccountUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<AccountProfile, InventoryServiceError> {
        self.repo
            .find_profile(id)
            .await?
            .ok_or(InventoryServiceError::AccountNotFound)
    }
}

// ── ListAccounts ─────────────────────────────────────────────────────────────

pub struct ListAccountsUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> ListAccountsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<AccountProfile>, InventoryServiceError> {
        self.repo.list_profiles().await
    }
}

// ── CreateAccount ────────────────────────────────────────────────────────────

pub struct CreateAccountInput {
    pub username: String,
    pub password: String,
    /// `"normal"` or `"admin"`; `None` means normal.
    pub role: Option<String>,
    pub details: AccountDetails,
}

pub struct CreateAccountUseCase<R: AccountRepository, H: CredentialHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: AccountRepository, H: CredentialHasher> CreateAccountUseCase<R, H> {
    pub async fn execute(
        &self,
        input: CreateAccountInput,
    ) -> Result<AccountProfile, InventoryServiceError> {
        let username = input.username.trim().to_owned();
        require_non_empty("username", &username)?;
        require_non_empty("password", &input.password)?;
        validate_details(&input.details)?;
        let role = match input.role.as_deref() {
            Some(raw) => raw.parse::<Role>()?,
            None => Role::default(),
        };

        if self.repo.find_by_username(&username).await?.is_some() {
            return Err(ValidationError::DuplicateUsername(username).into());
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let profile = self
            .repo
            .create(&NewAccount {
                username,
                password_hash,
                role,
                details: input.details,
            })
            .await?;
        tracing::info!(
            account_id = profile.account.id,
            username = %profile.account.username,
            role = %profile.account.role,
            "account created"
        );
        Ok(profile)
    }
}

// ── UpdateOwnProfile ─────────────────────────────────────────────────────────

pub struct UpdateOwnProfileInput {
    pub details: AccountDetails,
    pub current_password: String,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Profile edit by the account owner. The current password must be re-entered; a new
/// password must be typed twice.
pub struct UpdateOwnProfileUseCase<R: AccountRepository, H: CredentialHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: AccountRepository, H: CredentialHasher> UpdateOwnProfileUseCase<R, H> {
    pub async fn execute(
        &self,
        username: &str,
        input: UpdateOwnProfileInput,
    ) -> Result<(), InventoryServiceError> {
        let account = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(InventoryServiceError::AccountNotFound)?;
        if !self
            .hasher
            .verify(&input.current_password, &account.password_hash)
        {
            return Err(ValidationError::IncorrectPassword.into());
        }
        validate_details(&input.details)?;

        let new_hash = match input.new_password.filter(|p| !p.is_empty()) {
            Some(new_password) => {
                if input.confirm_password.as_deref() != Some(new_password.as_str()) {
                    return Err(ValidationError::PasswordMismatch.into());
                }
                Some(self.hasher.hash(&new_password)?)
            }
            None => None,
        };

        if !self
            .repo
            .update_profile(account.id, &input.details, new_hash.as_deref())
            .await?
        {
            return Err(InventoryServiceError::AccountNotFound);
        }
        tracing::info!(
            account_id = account.id,
            password_changed = new_hash.is_some(),
            "profile updated"
        );
        Ok(())
    }
}

// ── UpdateAccount ────────────────────────────────────────────────────────────

pub struct UpdateAccountInput {
    pub details: AccountDetails,
    /// Password reset; blank keeps the current password.
    pub new_password: Option<String>,
}

/// Admin edit of any account's profile.
pub struct UpdateAccountUseCase<R: AccountRepository, H: CredentialHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: AccountRepository, H: CredentialHasher> UpdateAccountUseCase<R, H> {
    pub async fn execute(
        &self,
        id: i32,
        input: UpdateAccountInput,
    ) -> Result<AccountProfile, InventoryServiceError> {
        validate_details(&input.details)?;
        let new_hash = match input.new_password.filter(|p| !p.is_empty()) {
            Some(password) => Some(self.hasher.hash(&password)?),
            None => None,
        };
        if !self
            .repo
            .update_profile(id, &input.details, new_hash.as_deref())
            .await?
        {
            return Err(InventoryServiceError::AccountNotFound);
        }
        self.repo
            .find_profile(id)
            .await?
            .ok_or(InventoryServiceError::AccountNotFound)
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> DeleteAccountUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), InventoryServiceError> {
        if !self.repo.delete(id).await? {
            return Err(InventoryServiceError::AccountNotFound);
        }
        tracing::info!(account_id = id, "account deleted");
        Ok(())
    }
}
