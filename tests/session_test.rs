use axum_extra::extract::cookie::{Cookie, CookieJar};
use sptop::{
    session::{self, MAX_REFRESH_ATTEMPTS, SessionState},
    types::TokenPair,
};

fn jar(cookies: &[(&'static str, &'static str)]) -> CookieJar {
    cookies
        .iter()
        .fold(CookieJar::new(), |jar, (name, value)| jar.add(Cookie::new(*name, *value)))
}

#[test]
fn test_session_state_from_cookies() {
    assert_eq!(SessionState::from_cookies(&jar(&[])), SessionState::Unauthenticated);
    assert_eq!(
        SessionState::from_cookies(&jar(&[("access_token", "AT1")])),
        SessionState::Unauthenticated
    );
    assert_eq!(
        SessionState::from_cookies(&jar(&[("refresh_token", "RT1")])),
        SessionState::Unauthenticated
    );
    assert_eq!(
        SessionState::from_cookies(&jar(&[("access_token", ""), ("refresh_token", "RT1")])),
        SessionState::Unauthenticated
    );
    assert_eq!(
        SessionState::from_cookies(&jar(&[("access_token", "AT1"), ("refresh_token", "RT1")])),
        SessionState::Authenticated(TokenPair::new("AT1", "RT1"))
    );
}

#[test]
fn test_refresh_attempts() {
    assert_eq!(session::refresh_attempts(&jar(&[])), 0);
    assert_eq!(session::refresh_attempts(&jar(&[("refresh_attempts", "1")])), 1);
    assert_eq!(session::refresh_attempts(&jar(&[("refresh_attempts", "lots")])), 0);

    assert!(!session::refresh_budget_exhausted(&jar(&[("refresh_attempts", "1")])));
    let exhausted = MAX_REFRESH_ATTEMPTS.to_string();
    let jar = CookieJar::new().add(Cookie::new("refresh_attempts", exhausted));
    assert!(session::refresh_budget_exhausted(&jar));
}

#[test]
fn test_store_tokens() {
    let jar = session::store_tokens(CookieJar::new(), &TokenPair::new("AT2", "RT2"));

    let access = jar.get(session::ACCESS_TOKEN_COOKIE).unwrap();
    assert_eq!(access.value(), "AT2");
    assert_eq!(access.path(), Some("/"));
    assert_eq!(access.http_only(), Some(true));
    assert_eq!(
        access.max_age().map(|d| d.whole_seconds()),
        Some(session::TOKEN_MAX_AGE_SECS)
    );
    assert_eq!(jar.get(session::REFRESH_TOKEN_COOKIE).unwrap().value(), "RT2");

    let jar = session::record_refresh_attempt(jar, 2);
    assert_eq!(session::refresh_attempts(&jar), 2);
    assert!(session::refresh_budget_exhausted(&jar));

    let jar = session::clear_refresh_attempts(jar);
    assert_eq!(session::refresh_attempts(&jar), 0);
}

#[test]
fn test_clear() {
    let jar = session::clear(session::store_tokens(CookieJar::new(), &TokenPair::new("AT1", "RT1")));

    assert!(jar.get(session::ACCESS_TOKEN_COOKIE).is_none());
    assert!(jar.get(session::REFRESH_TOKEN_COOKIE).is_none());
    assert_eq!(SessionState::from_cookies(&jar), SessionState::Unauthenticated);
}
