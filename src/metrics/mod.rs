//! Metrics collection and exposition for Prometheus.
//!
//! Covers the request pipeline, token refresh and the route guard.

mod recorder;

pub use recorder::{Metrics, MetricsRecorder};
