//! Authenticated-subject extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

/// Username of the session that passed validation for this request.
///
/// The session layer inserts it into request extensions after validating and refreshing
/// the token. Returns 401 when the layer did not run or rejected the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub username: String,
}

impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares `fn -> impl Future + Send`; read synchronously and return a
    // 'static async block so no borrow of `parts` is captured.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts.extensions.get::<SessionIdentity>().cloned();
        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
