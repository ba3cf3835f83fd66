//! Prometheus metrics for the warehouse backbone.
//!
//! All metrics follow the naming convention: `wh_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // TOKEN SERVICE
    // =========================================================================

    /// Tokens minted (issue and refresh)
    pub static ref TOKENS_ISSUED: Counter = Counter::new(
        "wh_auth_tokens_issued_total",
        "Total number of tokens issued"
    ).expect("metric creation failed");

    /// Rejected tokens by reason
    pub static ref TOKEN_VALIDATION_FAILURES: CounterVec = CounterVec::new(
        Opts::new("wh_auth_validation_failures_total", "Total rejected tokens"),
        &["reason"]  // malformed/signature/algorithm/expired/not_yet_valid/issuer
    ).expect("metric creation failed");

    /// Time spent validating a token
    pub static ref TOKEN_VALIDATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "wh_auth_validation_duration_seconds",
            "Time spent validating tokens"
        ).buckets(exponential_buckets(0.000_01, 2.0, 14).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // CHANNEL REGISTRY
    // =========================================================================

    /// Broker clients created by the registry
    pub static ref CHANNELS_CREATED: CounterVec = CounterVec::new(
        Opts::new("wh_bus_channels_created_total", "Total broker clients created"),
        &["kind"]  // publisher/subscriber
    ).expect("metric creation failed");

    /// Messages handed to the broker
    pub static ref MESSAGES_PUBLISHED: CounterVec = CounterVec::new(
        Opts::new("wh_bus_messages_published_total", "Total messages published"),
        &["topic"]
    ).expect("metric creation failed");

    /// Handles that failed to close during shutdown
    pub static ref CLOSE_FAILURES: Counter = Counter::new(
        "wh_bus_close_failures_total",
        "Total broker clients that failed to close"
    ).expect("metric creation failed");
}

/// Handle to the metrics registry.
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Token service
        Box::new(TOKENS_ISSUED.clone()),
        Box::new(TOKEN_VALIDATION_FAILURES.clone()),
        Box::new(TOKEN_VALIDATION_DURATION.clone()),
        // Channel registry
        Box::new(CHANNELS_CREATED.clone()),
        Box::new(MESSAGES_PUBLISHED.clone()),
        Box::new(CLOSE_FAILURES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
