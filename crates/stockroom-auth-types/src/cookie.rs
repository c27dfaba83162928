//! Cookie builders for the session token and the session-expired marker.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

/// Cookie name for the session token.
pub const ACCESS_TOKEN: &str = "access_token";

/// Cookie name for the short-lived marker raised when a session times out.
pub const SESSION_EXPIRED: &str = "session_expired";

/// Lifetime of the session-expired marker in seconds. UI signal only.
pub const SESSION_EXPIRED_MARKER_SECS: i64 = 3;

/// Set the session-token cookie on the jar.
///
/// The cookie carries no Max-Age: freshness lives in the token, not the cookie.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use stockroom_auth_types::cookie::{set_session_cookie, ACCESS_TOKEN};
///
/// let jar = set_session_cookie(CookieJar::new(), "token_value".to_string());
/// let cookie = jar.get(ACCESS_TOKEN).unwrap();
/// assert_eq!(cookie.value(), "token_value");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), None);
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String) -> CookieJar {
    let cookie = Cookie::build((ACCESS_TOKEN, value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session-token cookie by setting Max-Age to 0 (logout).
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use stockroom_auth_types::cookie::{clear_session_cookie, set_session_cookie, ACCESS_TOKEN};
///
/// let jar = set_session_cookie(CookieJar::new(), "t".to_string());
/// let jar = clear_session_cookie(jar);
/// let cookie = jar.get(ACCESS_TOKEN).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((ACCESS_TOKEN, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session and raise the `session_expired` marker for a few seconds.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use stockroom_auth_types::cookie::{expire_session, ACCESS_TOKEN, SESSION_EXPIRED};
///
/// let jar = expire_session(CookieJar::new());
/// assert_eq!(jar.get(ACCESS_TOKEN).unwrap().max_age(), Some(time::Duration::ZERO));
/// let marker = jar.get(SESSION_EXPIRED).unwrap();
/// assert_eq!(marker.value(), "true");
/// assert_eq!(marker.max_age(), Some(time::Duration::seconds(3)));
/// ```
pub fn expire_session(jar: CookieJar) -> CookieJar {
    let marker = Cookie::build((SESSION_EXPIRED, "true"))
        .path("/")
        .max_age(Duration::seconds(SESSION_EXPIRED_MARKER_SECS))
        .expires(OffsetDateTime::now_utc() + Duration::seconds(SESSION_EXPIRED_MARKER_SECS))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    clear_session_cookie(jar).add(marker)
}
