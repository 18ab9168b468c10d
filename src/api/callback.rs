use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
    Res, api::page, server::AppState, session, success, types::AuthorizationCode, warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
) -> Res<Response> {
    if let Some(error) = params.error {
        warning!("Authorization was not granted: {}", error);
        return Ok(bad_request(
            "Authorization denied",
            "Spotify did not grant access, so there is nothing to show.",
        ));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Ok(bad_request(
            "Missing authorization code",
            "The callback was called without a code.",
        ));
    };

    let token = state.spotify.exchange_code(AuthorizationCode::new(code)).await?;
    success!("Authorization code exchanged for tokens");

    let jar = session::clear_refresh_attempts(session::store_tokens(jar, &token));
    Ok((jar, Redirect::to("/")).into_response())
}

fn bad_request(title: &str, message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Html(page::failure(title, message))).into_response()
}
