//! Prometheus metrics endpoint and HTTP metrics middleware

pub mod handlers;
pub mod middleware;

pub use handlers::{prometheus_handle, prometheus_metrics, MetricsState};
pub use middleware::http_metrics_middleware;
