//! # API Module
//!
//! HTTP routes of the app. Together they form the session controller: each
//! handler reads the session state from the request cookies, talks to
//! Spotify through [`crate::spotify::SpotifyClient`], and answers with a
//! page, a redirect, or both plus cookie updates.
//!
//! ## Endpoints
//!
//! - [`index`] - `GET /`. Redirects unauthenticated visitors to Spotify's
//!   authorization page, renders top artists and tracks for authenticated
//!   ones, and refreshes the access token when Spotify answers `401`.
//! - [`callback`] - `GET /callback?code=…`. Exchanges the authorization code
//!   for tokens, stores them in cookies and redirects to `/`.
//! - [`logout`] - `GET /logout`. Drops the session cookies.
//! - [`health`] - `GET /health`. Status and version as JSON.
//!
//! ## Errors
//!
//! Handlers return [`crate::Res`]. Errors that reach the route boundary are
//! rendered as a generic failure page by the `IntoResponse` impl of
//! [`crate::Error`]; a revoked refresh token never gets that far and is turned
//! into a fresh authorization instead.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sptop::api::{callback, health, index, logout};
//!
//! let app = Router::new()
//!     .route("/", get(index))
//!     .route("/callback", get(callback))
//!     .route("/logout", get(logout))
//!     .route("/health", get(health))
//!     .with_state(state);
//! ```

mod callback;
mod health;
mod index;
mod logout;
pub mod page;

pub use callback::callback;
pub use health::health;
pub use index::index;
pub use logout::logout;
