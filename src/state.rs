//! Shared application state for the page server.

use std::sync::Arc;

use crate::config::ConfigV1;
use crate::guard::RouteRules;
use crate::metrics::Metrics;

/// Cloned into every handler and middleware call.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigV1>,
    /// Redirect rules built once from `config.guard`.
    pub rules: Arc<RouteRules>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: Arc<ConfigV1>, metrics: Metrics) -> Self {
        let rules = Arc::new(RouteRules::from_config(&config.guard));
        AppState {
            config,
            rules,
            metrics,
        }
    }
}
