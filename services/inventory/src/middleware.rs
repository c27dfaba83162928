use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use stockroom_auth_types::cookie::{ACCESS_TOKEN, set_session_cookie};
use stockroom_auth_types::identity::SessionIdentity;
use stockroom_auth_types::session::{SessionError, SessionManager};

use crate::error::InventoryServiceError;

/// Session gate for protected routes.
///
/// Validates the `access_token` cookie, exposes the subject as [`SessionIdentity`] and
/// hands the refreshed token back on every response, error responses included. A stale
/// session is answered with `SESSION_EXPIRED`, which clears the cookie and raises the
/// expiry marker.
pub async fn require_session(
    State(sessions): State<Arc<SessionManager>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = jar.get(ACCESS_TOKEN).map(|c| c.value().to_owned()) else {
        return InventoryServiceError::Unauthenticated.into_response();
    };

    match sessions.validate(&token) {
        Ok(session) => {
            request.extensions_mut().insert(SessionIdentity {
                username: session.subject,
            });
            let response = next.run(request).await;
            (set_session_cookie(jar, session.refreshed_token), response).into_response()
        }
        Err(SessionError::Expired) => InventoryServiceError::SessionExpired.into_response(),
        Err(SessionError::Unauthenticated) => {
            InventoryServiceError::Unauthenticated.into_response()
        }
        Err(SessionError::Signing(e)) => {
            InventoryServiceError::Internal(anyhow::Error::new(e).context("refresh session"))
                .into_response()
        }
    }
}
