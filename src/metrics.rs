//! Prometheus metrics for upstream latency and request outcomes.
//!
//! This module provides metrics for:
//! - Upstream API request latency and outcome, per service
//! - Food detail lookups that failed and were degraded to empty nutrients
//! - Search requests handled, per endpoint and outcome

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Upstream request latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_request_latency_ms";
/// Upstream requests counter metric name.
pub const METRIC_UPSTREAM_REQUESTS: &str = "upstream_requests_total";
/// Swallowed food detail failures counter metric name.
pub const METRIC_FOOD_DETAIL_FAILURES: &str = "food_detail_failures_total";
/// Search requests counter metric name.
pub const METRIC_SEARCH_REQUESTS: &str = "search_requests_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Upstream API request latency in milliseconds"
    );

    describe_counter!(
        METRIC_UPSTREAM_REQUESTS,
        "Total number of upstream API requests by service and outcome"
    );
    describe_counter!(
        METRIC_FOOD_DETAIL_FAILURES,
        "Food detail lookups that failed and returned empty nutrients"
    );
    describe_counter!(
        METRIC_SEARCH_REQUESTS,
        "Total number of search requests by endpoint and outcome"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Increment upstream request counter.
pub fn inc_upstream_requests(service: &'static str, outcome: &'static str) {
    counter!(METRIC_UPSTREAM_REQUESTS, "service" => service, "outcome" => outcome).increment(1);
}

/// Increment swallowed food detail failures counter.
pub fn inc_food_detail_failures() {
    counter!(METRIC_FOOD_DETAIL_FAILURES).increment(1);
}

/// Increment search requests counter.
pub fn inc_search_requests(endpoint: &'static str, outcome: &'static str) {
    counter!(METRIC_SEARCH_REQUESTS, "endpoint" => endpoint, "outcome" => outcome).increment(1);
}

/// RAII guard for timing upstream requests.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    service: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given upstream service.
    pub fn upstream(service: &'static str) -> Self {
        Self {
            start: Instant::now(),
            service,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        histogram!(METRIC_UPSTREAM_LATENCY, "service" => self.service).record(latency_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = LatencyTimer::upstream("test");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
    }

    #[test]
    fn counters_without_recorder_are_noops() {
        inc_upstream_requests("usda", "ok");
        inc_food_detail_failures();
        inc_search_requests("usda-search", "ok");
    }
}
