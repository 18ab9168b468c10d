use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;

use crate::{Res, api, config::Config, info, spotify::SpotifyClient};

/// Shared by every request. Read-only; session state lives in cookies.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spotify: SpotifyClient,
}

impl AppState {
    pub fn new(config: Config) -> Res<Self> {
        let config = Arc::new(config);
        let spotify = SpotifyClient::new(Arc::clone(&config))?;
        Ok(Self { config, spotify })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/health", get(api::health))
        .with_state(state)
}

/// Serves the app on an already bound listener.
pub async fn serve(listener: TcpListener, config: Config) -> Res<()> {
    let app = router(AppState::new(config)?);

    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
