//! HTTP route definitions.
//!
//! Page routes sit behind the route guard; health and metrics do not.

mod health_routes;
mod metrics;
mod pages;

use crate::guard::route_guard;
use crate::state::AppState;
use axum::{Router, middleware};

/// Creates the application router with all configured routes.
pub fn create_router(state: AppState) -> Router {
    let pages = pages::routes().layer(middleware::from_fn_with_state(state.clone(), route_guard));

    Router::new()
        .merge(pages)
        .merge(health_routes::routes())
        .merge(metrics::routes())
        .with_state(state)
}
