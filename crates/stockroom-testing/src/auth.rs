//! Session helpers for integration tests.
//!
//! Protected routes read the session token from the `access_token` cookie. `TestSessions`
//! signs tokens with a fixed secret so tests can forge fresh or stale sessions without
//! going through login.

use axum::http::{HeaderValue, Response, header};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::Algorithm;
use stockroom_auth_types::cookie::ACCESS_TOKEN;
use stockroom_auth_types::session::{DEFAULT_INACTIVITY_LIMIT, SessionManager};
use stockroom_auth_types::token::SessionCodec;

pub const TEST_SECRET: &str = "stockroom-test-secret";

pub struct TestSessions {
    manager: SessionManager,
}

impl Default for TestSessions {
    fn default() -> Self {
        Self::new(DEFAULT_INACTIVITY_LIMIT)
    }
}

impl TestSessions {
    pub fn new(inactivity_limit: TimeDelta) -> Self {
        let codec = SessionCodec::new(TEST_SECRET, Algorithm::HS256).unwrap();
        Self {
            manager: SessionManager::new(codec, inactivity_limit),
        }
    }

    /// A manager sharing this helper's secret, for wiring into the app under test.
    pub fn manager(&self) -> SessionManager {
        self.manager.clone()
    }

    pub fn token(&self, username: &str) -> String {
        self.manager.issue(username).unwrap()
    }

    /// Token whose last activity lies `idle` in the past.
    pub fn idle_token(&self, username: &str, idle: TimeDelta) -> String {
        self.token_at(username, Utc::now() - idle)
    }

    pub fn token_at(&self, username: &str, last_activity: DateTime<Utc>) -> String {
        self.manager.issue_at(username, last_activity).unwrap()
    }

    /// `Cookie` header value carrying a fresh session for `username`.
    pub fn cookie(&self, username: &str) -> HeaderValue {
        cookie_header(&self.token(username))
    }
}

pub fn cookie_header(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{ACCESS_TOKEN}={token}")).unwrap()
}

/// Collect every `Set-Cookie` header of a response as strings.
pub fn set_cookies<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

/// Value of the `Set-Cookie` entry named `name`, if any.
pub fn set_cookie_value<B>(response: &Response<B>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response).into_iter().find_map(|c| {
        c.strip_prefix(&prefix)
            .map(|rest| rest.split(';').next().unwrap_or_default().to_owned())
    })
}
