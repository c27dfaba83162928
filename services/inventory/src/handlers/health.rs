use axum::extract::State;
use axum::http::StatusCode;

use stockroom_core::health::store_readiness;

use crate::state::AppState;

// ── GET /readyz ──────────────────────────────────────────────────────────────

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    store_readiness(&state.db).await
}
