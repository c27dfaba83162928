use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use stockroom_auth_types::cookie::{clear_session_cookie, set_session_cookie};

use crate::error::InventoryServiceError;
use crate::state::AppState;
use crate::usecase::session::{AuthenticateUseCase, LoginUseCase};

// ── POST /session ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<TokenResponse>), InventoryServiceError> {
    let usecase = LoginUseCase {
        authenticate: AuthenticateUseCase {
            repo: state.account_repo(),
            hasher: state.hasher(),
        },
        sessions: &state.sessions,
    };
    let token = usecase.execute(&body.username, &body.password).await?;
    Ok((
        StatusCode::CREATED,
        set_session_cookie(jar, token.clone()),
        Json(TokenResponse {
            access_token: token,
            token_type: "bearer",
        }),
    ))
}

// ── DELETE /session ──────────────────────────────────────────────────────────

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (clear_session_cookie(jar), StatusCode::NO_CONTENT)
}
