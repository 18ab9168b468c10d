//! Spotify Top Items OAuth Example Library
//!
//! This library implements a small web application that walks a user through
//! the OAuth 2.0 Authorization Code flow against Spotify and then shows their
//! top artists and tracks. Tokens never live on the server: the browser keeps
//! them in cookies and the app refreshes the access token whenever Spotify
//! answers with `401 Unauthorized`.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers (index, callback, logout, health)
//! - `config` - Configuration loading from environment variables and `.env` files
//! - `error` - The crate error type and its mapping to HTTP responses
//! - `server` - Router construction and the HTTP server loop
//! - `session` - Cookie backed session state and the refresh guard
//! - `spotify` - Spotify accounts service and Web API client
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use sptop::{config, server};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> sptop::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let listener = TcpListener::bind(config.server_addr).await?;
//!     server::serve(listener, config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports one of the [`Error`]
/// variants, so route handlers can decide per variant whether to recover
/// (refresh, re-authenticate) or render the failure page.
///
/// # Example
///
/// ```
/// use sptop::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates such as incoming requests and redirects.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authorization code exchanged");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used during startup, for failures that leave nothing to serve
/// (missing credentials, an address that cannot be bound). Request handlers
/// never call it; they turn errors into a failure page instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: a failed token exchange, a revoked refresh
/// token, an upstream error rendered as a failure page.
///
/// # Example
///
/// ```
/// warning!("Token refresh failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
