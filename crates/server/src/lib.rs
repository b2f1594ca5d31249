pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use utoipa_scalar::{Scalar, Servable};

pub use api::create_router;
pub use config::{Config, Environment};
pub use db::create_pool;
pub use error::{AppError, AppResult};
pub use state::AppState;

pub async fn run_server(
    addr: SocketAddr,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    // Ensure data directory exists
    std::fs::create_dir_all(&config.data_path)?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    tracing::info!("Database ready at {}", config.data_path.display());

    tracing::info!(
        "Transmission at {}, syncing every {:?}",
        config.transmission.rpc_url(),
        config.sync_interval()
    );
    let state = AppState::new(pool, config)?;
    state.scheduler.start();

    let (router, api) = create_router(state);

    let app = router
        .merge(Scalar::with_url("/docs", api))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
