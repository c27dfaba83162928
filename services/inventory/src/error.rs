use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use stockroom_auth_types::cookie::expire_session;
use stockroom_core::sea_ext::{StoreFailure, classify_chain};
use stockroom_domain::account::Forbidden;
use stockroom_domain::stock::{InsufficientStock, StockError};
use stockroom_domain::validation::ValidationError;

/// Inventory service error variants.
#[derive(Debug, thiserror::Error)]
pub enum InventoryServiceError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("session expired")]
    SessionExpired,
    #[error("forbidden")]
    Forbidden,
    #[error("account not found")]
    AccountNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    InsufficientStock(#[from] InsufficientStock),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("product has recorded movements")]
    ProductInUse,
    #[error("store unavailable, retry later")]
    StoreUnavailable,
    #[error("internal error")]
    Internal(anyhow::Error),
}

impl InventoryServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InsufficientStock(_) => "INSUFFICIENT_STOCK",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::ProductInUse => "PRODUCT_IN_USE",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

// Connection failures anywhere in the chain become retryable.
impl From<anyhow::Error> for InventoryServiceError {
    fn from(err: anyhow::Error) -> Self {
        match classify_chain(err.chain()) {
            StoreFailure::Unavailable => Self::StoreUnavailable,
            _ => Self::Internal(err),
        }
    }
}

impl From<Forbidden> for InventoryServiceError {
    fn from(_: Forbidden) -> Self {
        Self::Forbidden
    }
}

impl From<StockError> for InventoryServiceError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::Invalid(e) => Self::Validation(e),
            StockError::Insufficient(e) => Self::InsufficientStock(e),
        }
    }
}

impl IntoResponse for InventoryServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials | Self::Unauthenticated | Self::SessionExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::AccountNotFound | Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::InvalidDate(_) => StatusCode::BAD_REQUEST,
            Self::InsufficientStock(_) | Self::ProductInUse => StatusCode::CONFLICT,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
            }
            Self::StoreUnavailable => {
                tracing::warn!(kind = "STORE_UNAVAILABLE", "store unavailable");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        let response = (status, axum::Json(body));
        if matches!(self, Self::SessionExpired) {
            return (expire_session(CookieJar::new()), response).into_response();
        }
        response.into_response()
    }
}
