#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::{header::SET_COOKIE, redirect::Policy};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use sptop::{config::Config, server, spotify::ClientCredential};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const REDIRECT_URI: &str = "http://localhost/callback";

/// Behaviour and request log of the fake accounts service and Web API.
#[derive(Debug, Default)]
pub struct StubState {
    /// authorization code -> token endpoint response body
    pub codes: HashMap<String, Value>,
    /// refresh token -> token endpoint response body
    pub refresh_tokens: HashMap<String, Value>,
    pub valid_access_tokens: HashSet<String>,
    /// items returned per top list, regardless of the requested limit
    pub item_count: usize,
    /// forces this status on the top items endpoint
    pub top_status: Option<u16>,
    /// forces a status on one top list only, keyed by kind
    pub top_status_for: HashMap<String, u16>,
    pub token_requests: Vec<HashMap<String, String>>,
    pub token_auth_headers: Vec<String>,
    pub top_requests: Vec<(String, HashMap<String, String>)>,
}

#[derive(Debug, Clone, Default)]
pub struct Stub {
    pub state: Arc<Mutex<StubState>>,
}

impl Stub {
    pub fn new() -> Self {
        let stub = Self::default();
        stub.state.lock().unwrap().item_count = 10;
        stub
    }

    pub fn with_code(self, code: &str, body: Value) -> Self {
        self.state.lock().unwrap().codes.insert(code.to_string(), body);
        self
    }

    pub fn with_refresh(self, refresh_token: &str, body: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .refresh_tokens
            .insert(refresh_token.to_string(), body);
        self
    }

    pub fn with_access_token(self, access_token: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .valid_access_tokens
            .insert(access_token.to_string());
        self
    }

    pub fn with_top_status(self, status: u16) -> Self {
        self.state.lock().unwrap().top_status = Some(status);
        self
    }

    pub fn with_top_status_for(self, kind: &str, status: u16) -> Self {
        self.state
            .lock()
            .unwrap()
            .top_status_for
            .insert(kind.to_string(), status);
        self
    }

    pub fn token_requests(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().unwrap().token_requests.clone()
    }

    pub fn token_auth_headers(&self) -> Vec<String> {
        self.state.lock().unwrap().token_auth_headers.clone()
    }

    pub fn top_requests(&self) -> Vec<(String, HashMap<String, String>)> {
        self.state.lock().unwrap().top_requests.clone()
    }

    /// Starts the stub on a random local port and returns its base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/authorize", get(|| async { "authorize" }))
            .route("/api/token", post(token))
            .route("/v1/me/top/{kind}", get(top))
            .with_state(self.clone());

        let addr = spawn_router(app).await;
        format!("http://{}", addr)
    }
}

async fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn token(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Form(params): Form<HashMap<String, String>>,
) -> Response {
    let mut state = stub.state.lock().unwrap();
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.token_auth_headers.push(auth);
    state.token_requests.push(params.clone());

    let body = match params.get("grant_type").map(String::as_str) {
        Some("authorization_code") => params.get("code").and_then(|c| state.codes.get(c)),
        Some("refresh_token") => params
            .get("refresh_token")
            .and_then(|t| state.refresh_tokens.get(t)),
        _ => None,
    };

    match body {
        Some(body) => Json(body.clone()).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant", "error_description": "Invalid grant"})),
        )
            .into_response(),
    }
}

async fn top(
    State(stub): State<Stub>,
    Path(kind): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut state = stub.state.lock().unwrap();
    state.top_requests.push((kind.clone(), query));

    let forced = state.top_status_for.get(&kind).copied().or(state.top_status);
    if let Some(status) = forced {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, Json(json!({"error": {"status": status.as_u16()}}))).into_response();
    }

    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();
    if !state.valid_access_tokens.contains(bearer) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"status": 401, "message": "The access token expired"}})),
        )
            .into_response();
    }

    let items: Vec<Value> = (1..=state.item_count)
        .map(|i| match kind.as_str() {
            "artists" => json!({
                "id": format!("artist{}", i),
                "name": format!("Artist {}", i),
                "genres": ["indie", "rock"],
                "popularity": 50,
                "external_urls": {"spotify": format!("https://open.spotify.com/artist/artist{}", i)},
                "type": "artist",
            }),
            _ => json!({
                "id": format!("track{}", i),
                "name": format!("Track {}", i),
                "artists": [{"id": "artist1", "name": "Artist 1"}],
                "album": {"name": format!("Album {}", i)},
                "type": "track",
            }),
        })
        .collect();

    Json(json!({ "items": items, "limit": items.len(), "next": null })).into_response()
}

pub fn test_config(stub_url: &str) -> Config {
    Config {
        credential: ClientCredential::new(CLIENT_ID, CLIENT_SECRET),
        scope: "user-top-read".to_string(),
        redirect_uri: REDIRECT_URI.to_string(),
        auth_url: format!("{}/authorize", stub_url),
        token_url: format!("{}/api/token", stub_url),
        api_url: format!("{}/v1", stub_url),
        limit: 5,
        server_addr: "127.0.0.1:0".parse().unwrap(),
        http_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
    }
}

/// Starts the app against `stub_url` and returns its base URL.
pub async fn spawn_app(stub_url: &str) -> String {
    spawn_app_with(test_config(stub_url)).await
}

pub async fn spawn_app_with(config: Config) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, config));
    format!("http://{}", addr)
}

/// Browser stand-in that does not follow redirects.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

/// `Set-Cookie` headers of a response, keyed by cookie name.
pub fn set_cookies(res: &reqwest::Response) -> HashMap<String, String> {
    res.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|raw| {
            let (name, _) = raw.split_once('=')?;
            Some((name.to_string(), raw.to_string()))
        })
        .collect()
}

/// Value of a cookie as set in a `Set-Cookie` header.
pub fn cookie_value(raw: &str) -> &str {
    raw.split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value)
        .unwrap_or_default()
}

pub fn is_removal(raw: &str) -> bool {
    raw.contains("Max-Age=0")
}

pub fn location(res: &reqwest::Response) -> String {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
