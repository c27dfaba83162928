use axum::body::{Body, to_bytes};
use axum::http::Response;
use serde_json::Value;

/// Read the whole body and parse it as JSON.
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read the `kind` field of an error body.
pub async fn error_kind(response: Response<Body>) -> String {
    json_body(response).await["kind"]
        .as_str()
        .unwrap_or_default()
        .to_owned()
}
