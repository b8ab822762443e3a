//! Page server startup.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::routes;
use crate::state::AppState;

/// Binds `config.bind_address` and serves the guarded pages until the process stops.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config.clone(), Metrics::new());
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!(
        event_name = "server.started",
        event_domain = "server",
        address = config.bind_address.as_str(),
        api = config.api.endpoint_root().as_str(),
        "Starting server on {}",
        config.bind_address
    );

    axum::serve(listener, app).await?;
    Ok(())
}
