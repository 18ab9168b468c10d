use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    Error, Res, api::page, info, server::AppState, session, session::SessionState,
    types::{TokenPair, TopArtist, TopTrack},
    warning,
};

/// Entry route; drives the session state machine one step per request.
///
/// - `Unauthenticated` - redirect to Spotify's authorization page
/// - `Authenticated` - fetch top artists and tracks and render them
/// - `NeedsRefresh` - entered when either fetch is refused with 401; refresh
///   the access token, update the cookies and redirect back here
///
/// The refresh path is bounded: after [`session::MAX_REFRESH_ATTEMPTS`]
/// refresh redirects without a successful render, or as soon as Spotify
/// rejects the refresh token, the session cookies are dropped and the user
/// is sent through authorization again.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Res<Response> {
    let mut session_state = SessionState::from_cookies(&jar);

    loop {
        match session_state {
            SessionState::Unauthenticated => return authorize(&state, session::clear(jar)),
            SessionState::Authenticated(token) => match fetch_top_items(&state, &token).await? {
                Some((artists, tracks)) => {
                    let jar = session::clear_refresh_attempts(session::store_tokens(jar, &token));
                    return Ok((jar, Html(page::top_items(&artists, &tracks))).into_response());
                }
                None => session_state = SessionState::NeedsRefresh(token),
            },
            SessionState::NeedsRefresh(token) => return refresh(&state, jar, token).await,
        }
    }
}

/// Both top lists, or `None` as soon as either call is refused with 401.
async fn fetch_top_items(
    state: &AppState,
    token: &TokenPair,
) -> Res<Option<(Vec<TopArtist>, Vec<TopTrack>)>> {
    let limit = state.config.limit;

    let Some(artists) = state.spotify.top_artists(token, limit).await? else {
        return Ok(None);
    };
    // the token can lapse between the two calls
    let Some(tracks) = state.spotify.top_tracks(token, limit).await? else {
        return Ok(None);
    };

    Ok(Some((artists, tracks)))
}

async fn refresh(state: &AppState, jar: CookieJar, mut token: TokenPair) -> Res<Response> {
    if session::refresh_budget_exhausted(&jar) {
        warning!("Access token still refused after refreshing, starting over");
        return authorize(state, session::clear(jar));
    }

    match state.spotify.refresh(&mut token).await {
        Ok(()) => {
            info!("Access token refreshed");
            let attempts = session::refresh_attempts(&jar) + 1;
            let jar = session::record_refresh_attempt(session::store_tokens(jar, &token), attempts);
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(Error::TokenRefresh(reason)) => {
            warning!("Refresh token rejected, starting over: {}", reason);
            authorize(state, session::clear(jar))
        }
        Err(e) => Err(e),
    }
}

fn authorize(state: &AppState, jar: CookieJar) -> Res<Response> {
    let url = state.spotify.authorize_url()?;
    info!("Redirecting to Spotify for authorization");
    Ok((jar, Redirect::to(url.as_str())).into_response())
}
