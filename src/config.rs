//! Configuration management for the Spotify top items example.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files into a single immutable [`Config`]. The config is built
//! once at startup and handed to the server, which shares it with every
//! request through the application state. Nothing reads the environment after
//! that point.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use crate::{Error, Res, spotify::ClientCredential, types};

pub const ENV_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_API_REDIRECT_URI";
pub const ENV_SCOPE: &str = "SPOTIFY_API_AUTH_SCOPE";
pub const ENV_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_RESULT_LIMIT: &str = "SPTOP_RESULT_LIMIT";
pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ENV_HTTP_TIMEOUT: &str = "SPTOP_HTTP_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT: &str = "SPTOP_CONNECT_TIMEOUT_SECS";

pub const DEFAULT_SCOPE: &str = "user-top-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory if it doesn't exist and loads variables
/// from `sptop/.env` inside it, then from a `.env` in the working directory.
/// Variables that are already set in the process environment win over both
/// files. Missing files are not an error; the build script places an
/// `.env.example` next to the expected location as a template.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sptop/.env`
/// - macOS: `~/Library/Application Support/sptop/.env`
/// - Windows: `%LOCALAPPDATA%/sptop/.env`
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the data directory cannot be created
/// or an existing `.env` file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Configuration(format!("{}: {}", parent.display(), e)))?;
    }

    if path.exists() {
        dotenv::from_path(&path)
            .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Configuration(format!(".env: {}", e))),
    }
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sptop/.env");
    path
}

/// Process-wide settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub credential: ClientCredential,
    pub scope: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub limit: u32,
    pub server_addr: SocketAddr,
    pub http_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the client id, client secret or
    /// redirect URI is missing, or if a numeric value or the server address
    /// cannot be parsed.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| {
            get(key).ok_or_else(|| Error::Configuration(format!("{} must be set", key)))
        };

        let credential = ClientCredential::new(required(ENV_CLIENT_ID)?, required(ENV_CLIENT_SECRET)?);
        let redirect_uri = required(ENV_REDIRECT_URI)?;

        let limit = match get(ENV_RESULT_LIMIT) {
            Some(raw) => types::clamp_limit(parse_number(ENV_RESULT_LIMIT, &raw)?),
            None => types::DEFAULT_LIMIT,
        };

        let server_addr = get(ENV_SERVER_ADDRESS)
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
        let server_addr = server_addr.parse::<SocketAddr>().map_err(|e| {
            Error::Configuration(format!("{} '{}': {}", ENV_SERVER_ADDRESS, server_addr, e))
        })?;

        let http_timeout = match get(ENV_HTTP_TIMEOUT) {
            Some(raw) => parse_timeout(ENV_HTTP_TIMEOUT, &raw)?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        let connect_timeout = match get(ENV_CONNECT_TIMEOUT) {
            Some(raw) => parse_timeout(ENV_CONNECT_TIMEOUT, &raw)?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        Ok(Self {
            credential,
            scope: get(ENV_SCOPE).unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            redirect_uri,
            auth_url: get(ENV_AUTH_URL).unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get(ENV_TOKEN_URL).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get(ENV_API_URL)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            limit,
            server_addr,
            http_timeout: Duration::from_secs(http_timeout),
            connect_timeout: Duration::from_secs(connect_timeout),
        })
    }

    /// URL a browser should open to reach the index route.
    pub fn app_url(&self) -> String {
        format!("http://{}/", self.server_addr)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Res<T>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| Error::Configuration(format!("{} '{}': {}", key, raw, e)))
}

/// Timeout in whole seconds, at least one.
fn parse_timeout(key: &str, raw: &str) -> Res<u64> {
    match parse_number(key, raw)? {
        0 => Err(Error::Configuration(format!(
            "{} '{}': must be greater than zero",
            key, raw
        ))),
        secs => Ok(secs),
    }
}
