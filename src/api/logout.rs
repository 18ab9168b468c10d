use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::{api::page, session};

pub async fn logout(jar: CookieJar) -> Response {
    (session::clear(jar), Html(page::signed_out())).into_response()
}
