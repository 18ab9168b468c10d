//! Cookie backed session state.
//!
//! The server keeps no per-user state. Everything the session controller
//! needs between requests travels in three cookies:
//!
//! - `access_token` / `refresh_token` - the token pair, 24 hours max-age
//! - `refresh_attempts` - how many refresh redirects happened since the last
//!   successful page render; bounds the refresh-redirect loop

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::types::TokenPair;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
pub const REFRESH_ATTEMPTS_COOKIE: &str = "refresh_attempts";

pub const TOKEN_MAX_AGE_SECS: i64 = 86_400;
pub const REFRESH_ATTEMPTS_MAX_AGE_SECS: i64 = 300;

/// Refresh redirects allowed before the session is dropped and the user is
/// sent back to the authorization server.
pub const MAX_REFRESH_ATTEMPTS: u32 = 2;

/// Where a request stands in the authorization flow.
///
/// Cookies only ever yield `Unauthenticated` or `Authenticated`. The index
/// route moves an `Authenticated` session to `NeedsRefresh` when the
/// resource server answers `401`, and dispatches it from there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No usable token pair in the request.
    Unauthenticated,
    /// Both tokens present; the access token is assumed valid until the
    /// resource server says otherwise.
    Authenticated(TokenPair),
    /// The resource server refused the access token.
    NeedsRefresh(TokenPair),
}

impl SessionState {
    /// Reads the token pair out of the request cookies.
    ///
    /// # Arguments
    ///
    /// * `jar` - Cookies sent with the request
    ///
    /// # Returns
    ///
    /// - `Authenticated` - both token cookies are present and non-empty
    /// - `Unauthenticated` - either cookie is missing or empty
    pub fn from_cookies(jar: &CookieJar) -> Self {
        let access_token = cookie_value(jar, ACCESS_TOKEN_COOKIE);
        let refresh_token = cookie_value(jar, REFRESH_TOKEN_COOKIE);

        match (access_token, refresh_token) {
            (Some(access_token), Some(refresh_token)) => {
                SessionState::Authenticated(TokenPair::new(access_token, refresh_token))
            }
            _ => SessionState::Unauthenticated,
        }
    }
}

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Number of refresh redirects recorded so far. Garbage counts as zero.
pub fn refresh_attempts(jar: &CookieJar) -> u32 {
    jar.get(REFRESH_ATTEMPTS_COOKIE)
        .and_then(|c| c.value().parse().ok())
        .unwrap_or(0)
}

/// Whether the refresh-redirect loop has run out of attempts.
///
/// # Returns
///
/// `true` once [`refresh_attempts`] reaches [`MAX_REFRESH_ATTEMPTS`]; the
/// caller should drop the session and re-authorize instead of refreshing.
pub fn refresh_budget_exhausted(jar: &CookieJar) -> bool {
    refresh_attempts(jar) >= MAX_REFRESH_ATTEMPTS
}

/// Sets both token cookies, restarting their max-age.
///
/// # Arguments
///
/// * `jar` - Jar the response will carry
/// * `token` - Token pair to persist, written as `access_token` and
///   `refresh_token`
///
/// # Returns
///
/// The jar with both cookies added (`Path=/`, `HttpOnly`, `SameSite=Lax`,
/// max-age [`TOKEN_MAX_AGE_SECS`]).
pub fn store_tokens(jar: CookieJar, token: &TokenPair) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        token.access_token.clone(),
        TOKEN_MAX_AGE_SECS,
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        token.refresh_token.clone(),
        TOKEN_MAX_AGE_SECS,
    ))
}

/// Stores the refresh counter with a short max-age so a stale count
/// expires on its own.
///
/// # Arguments
///
/// * `jar` - Jar the response will carry
/// * `attempts` - Refresh redirects so far, including the current one
pub fn record_refresh_attempt(jar: CookieJar, attempts: u32) -> CookieJar {
    jar.add(session_cookie(
        REFRESH_ATTEMPTS_COOKIE,
        attempts.to_string(),
        REFRESH_ATTEMPTS_MAX_AGE_SECS,
    ))
}

pub fn clear_refresh_attempts(jar: CookieJar) -> CookieJar {
    jar.remove(removal(REFRESH_ATTEMPTS_COOKIE))
}

/// Drops every session cookie.
///
/// # Returns
///
/// The jar with removals for the token cookies and the refresh counter.
/// Only cookies the request actually carried produce a `Set-Cookie`
/// removal in the response.
pub fn clear(jar: CookieJar) -> CookieJar {
    jar.remove(removal(ACCESS_TOKEN_COOKIE))
        .remove(removal(REFRESH_TOKEN_COOKIE))
        .remove(removal(REFRESH_ATTEMPTS_COOKIE))
}

fn session_cookie(name: &'static str, value: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .max_age(Duration::seconds(max_age_secs))
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

// path has to match the one the cookie was set with
fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}
