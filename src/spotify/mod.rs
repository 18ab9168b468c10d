//! # Spotify Integration Module
//!
//! Client for the two Spotify services this app talks to:
//!
//! ```text
//! Session controller (api::index, api::callback)
//!          ↓
//! SpotifyClient
//!     ├── credentials  Basic header for the accounts service
//!     ├── auth         authorization URL, code exchange, token refresh
//!     └── top          GET /me/top/{artists,tracks}
//!          ↓
//! reqwest (shared client, connect + request timeouts)
//! ```
//!
//! Every call returns a [`Res`]. Field presence in token responses is
//! checked explicitly; a response missing a required token is an error of
//! the matching grant, never a panic. The one non-error failure signal is a
//! `401` from the resource server, reported as `Ok(None)` so the caller can
//! refresh and retry.

mod auth;
mod credentials;
mod top;

pub use credentials::ClientCredential;

use std::sync::Arc;

use reqwest::Client;

use crate::{Res, config::Config};

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: Arc<Config>,
}

impl SpotifyClient {
    /// Builds the client with the configured connect and request timeouts.
    pub fn new(config: Arc<Config>) -> Res<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
