mod config;
mod error;
mod films;
mod models;
mod routes;
mod store;
mod users;

use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, films::FilmStore, users::UserStore};

#[derive(Clone, Default)]
pub struct AppState {
    pub films: FilmStore,
    pub users: UserStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt().with_env_filter(config.log_filter.as_str()).init();

    let state = Arc::new(AppState::default());

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
