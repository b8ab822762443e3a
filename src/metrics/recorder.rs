//! Metrics recording implementation using Prometheus.

use prometheus::{
    CounterVec, Encoder, HistogramVec, IntCounter, Opts, Registry, TextEncoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_int_counter_with_registry,
};
use std::sync::Arc;

/// Trait for recording client-side session metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records one outbound API call (initial send or retry) and its status.
    fn record_request(&self, method: &str, status: &str, attempt: u8);

    /// Records how long one outbound API call took.
    fn record_request_duration(&self, method: &str, duration_secs: f64);

    /// Records how a 401 was resolved: refreshed, joined an in-flight refresh, or failed.
    fn record_refresh(&self, outcome: &str);

    /// Records a forced logout after a terminal authentication failure.
    fn record_forced_logout(&self);

    /// Records a route guard decision.
    fn record_guard_decision(&self, outcome: &str);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    requests_total: CounterVec,
    request_duration_seconds: HistogramVec,
    refresh_total: CounterVec,
    forced_logouts_total: IntCounter,
    guard_decisions_total: CounterVec,
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let requests_total = register_counter_vec_with_registry!(
            Opts::new("api_requests_total", "Outbound API calls by method and status"),
            &["method", "status", "attempt"],
            registry.clone()
        )
        .expect("Failed to register api_requests_total");

        let request_duration_seconds = register_histogram_vec_with_registry!(
            "api_request_duration_seconds",
            "Outbound API call duration in seconds",
            &["method"],
            vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
            registry.clone()
        )
        .expect("Failed to register api_request_duration_seconds");

        let refresh_total = register_counter_vec_with_registry!(
            Opts::new("session_refresh_total", "Token refresh outcomes"),
            &["outcome"],
            registry.clone()
        )
        .expect("Failed to register session_refresh_total");

        let forced_logouts_total = register_int_counter_with_registry!(
            Opts::new(
                "session_forced_logouts_total",
                "Sessions cleared after a terminal authentication failure"
            ),
            registry.clone()
        )
        .expect("Failed to register session_forced_logouts_total");

        let guard_decisions_total = register_counter_vec_with_registry!(
            Opts::new("route_guard_decisions_total", "Route guard outcomes"),
            &["outcome"],
            registry.clone()
        )
        .expect("Failed to register route_guard_decisions_total");

        Metrics {
            registry,
            requests_total,
            request_duration_seconds,
            refresh_total,
            forced_logouts_total,
            guard_decisions_total,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::warn!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder for Metrics {
    fn record_request(&self, method: &str, status: &str, attempt: u8) {
        let attempt = attempt.to_string();
        self.requests_total
            .with_label_values(&[method, status, attempt.as_str()])
            .inc();
    }

    fn record_request_duration(&self, method: &str, duration_secs: f64) {
        self.request_duration_seconds
            .with_label_values(&[method])
            .observe(duration_secs);
    }

    fn record_refresh(&self, outcome: &str) {
        self.refresh_total.with_label_values(&[outcome]).inc();
    }

    fn record_forced_logout(&self) {
        self.forced_logouts_total.inc();
    }

    fn record_guard_decision(&self, outcome: &str) {
        self.guard_decisions_total.with_label_values(&[outcome]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_recorded_series() {
        let metrics = Metrics::new();
        metrics.record_request("GET", "200", 1);
        metrics.record_refresh("success");
        metrics.record_forced_logout();
        metrics.record_guard_decision("redirect_login");

        let text = metrics.render();
        assert!(text.contains("api_requests_total"));
        assert!(text.contains("session_refresh_total{outcome=\"success\"} 1"));
        assert!(text.contains("session_forced_logouts_total 1"));
        assert!(text.contains("route_guard_decisions_total{outcome=\"redirect_login\"} 1"));
    }

    #[test]
    fn test_instances_do_not_share_registries() {
        let a = Metrics::new();
        let b = Metrics::new();
        a.record_refresh("joined");
        assert!(!b.render().contains("joined"));
    }
}
