use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::{api::page, warning};

#[derive(Debug, Error)]
pub enum Error {
    /// The authorization code was rejected or the token response was unusable.
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// The refresh token was rejected; the session has to start over.
    #[error("token refresh failed: {0}")]
    TokenRefresh(String),

    /// The resource server failed with anything other than 401.
    #[error("fetching top {resource} failed: {reason}")]
    ResourceFetch { resource: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Configuration(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Route boundary: log the cause, show the browser a generic page.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        warning!("Request failed: {}", self);
        let status = self.status();
        (
            status,
            Html(page::failure(
                "Something went wrong",
                "Talking to Spotify failed. Please try again in a moment.",
            )),
        )
            .into_response()
    }
}
