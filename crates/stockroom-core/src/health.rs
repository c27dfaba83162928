use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

/// Handler for `GET /healthz`. Liveness only.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness: the store answers a ping. Services wrap this in their own `/readyz` handler.
pub async fn store_readiness(db: &DatabaseConnection) -> StatusCode {
    match db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            ::tracing::warn!(error = %e, "store ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
