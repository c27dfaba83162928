use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_auth_types::identity::SessionIdentity;
use stockroom_domain::account::Role;

use crate::domain::types::{Account, AccountDetails, AccountProfile};
use crate::error::InventoryServiceError;
use crate::state::AppState;
use crate::usecase::account::{
    CreateAccountInput, CreateAccountUseCase, DeleteAccountUseCase, GetAccountUseCase,
    GetOwnProfileUseCase, ListAccountsUseCase, UpdateAccountInput, UpdateAccountUseCase,
    UpdateOwnProfileInput, UpdateOwnProfileUseCase,
};
use crate::usecase::authorize::AuthorizeUseCase;

#[derive(Serialize, Deserialize)]
pub struct DetailsBody {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl From<DetailsBody> for AccountDetails {
    fn from(body: DetailsBody) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            birth_date: body.birth_date,
            location: body.location,
            bio: body.bio,
        }
    }
}

impl From<AccountDetails> for DetailsBody {
    fn from(details: AccountDetails) -> Self {
        Self {
            first_name: details.first_name,
            last_name: details.last_name,
            birth_date: details.birth_date,
            location: details.location,
            bio: details.bio,
        }
    }
}

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub is_admin: bool,
    #[serde(serialize_with = "stockroom_core::datetime::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub details: Option<DetailsBody>,
}

impl From<AccountProfile> for AccountResponse {
    fn from(profile: AccountProfile) -> Self {
        let AccountProfile { account, details } = profile;
        Self {
            id: account.id,
            username: account.username,
            role: account.role,
            is_admin: account.role == Role::Admin,
            created_at: account.created_at,
            details: details.map(Into::into),
        }
    }
}

async fn require_admin(
    state: &AppState,
    identity: &SessionIdentity,
) -> Result<Account, InventoryServiceError> {
    let usecase = AuthorizeUseCase {
        repo: state.account_repo(),
    };
    usecase.execute(&identity.username, Role::Admin).await
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, InventoryServiceError> {
    let usecase = GetOwnProfileUseCase {
        repo: state.account_repo(),
    };
    let profile = usecase.execute(&identity.username).await?;
    Ok(Json(profile.into()))
}

// ── PUT /users/me ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    #[serde(flatten)]
    pub details: DetailsBody,
    pub current_password: String,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

pub async fn update_me(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<StatusCode, InventoryServiceError> {
    let usecase = UpdateOwnProfileUseCase {
        repo: state.account_repo(),
        hasher: state.hasher(),
    };
    usecase
        .execute(
            &identity.username,
            UpdateOwnProfileInput {
                details: body.details.into(),
                current_password: body.current_password,
                new_password: body.new_password,
                confirm_password: body.confirm_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/me/admin ──────────────────────────────────────────────────────

pub async fn check_admin(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<StatusCode, InventoryServiceError> {
    require_admin(&state, &identity).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_accounts(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, InventoryServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = ListAccountsUseCase {
        repo: state.account_repo(),
    };
    let profiles = usecase.execute().await?;
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
    #[serde(flatten)]
    pub details: DetailsBody,
}

pub async fn create_account(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), InventoryServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = CreateAccountUseCase {
        repo: state.account_repo(),
        hasher: state.hasher(),
    };
    let profile = usecase
        .execute(CreateAccountInput {
            username: body.username,
            password: body.password,
            role: body.role,
            details: body.details.into(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_account(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AccountResponse>, InventoryServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = GetAccountUseCase {
        repo: state.account_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /users/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(flatten)]
    pub details: DetailsBody,
    pub new_password: Option<String>,
}

pub async fn update_account(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, InventoryServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = UpdateAccountUseCase {
        repo: state.account_repo(),
        hasher: state.hasher(),
    };
    let profile = usecase
        .execute(
            id,
            UpdateAccountInput {
                details: body.details.into(),
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(Json(profile.into()))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_account(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, InventoryServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = DeleteAccountUseCase {
        repo: state.account_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
