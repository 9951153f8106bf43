//! # Metrics
//!
//! Prometheus metrics for monitoring the controller.
//!
//! ## Metrics Exposed
//!
//! - `app_service_certificate_operations_total` - Operations started, by operation
//! - `app_service_certificate_operation_errors_total` - Failed operations, by operation and error kind
//! - `app_service_certificate_operation_duration_seconds` - Duration of operations
//! - `app_service_certificate_api_requests_total` - Resource Manager requests, by api, method and status
//!
//! The controller runs once per invocation, so metrics are exported by writing
//! the text exposition format to a file (see [`gather_text`]).

use anyhow::Result;
use prometheus::{Encoder, HistogramVec, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

// Metrics
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "app_service_certificate_operations_total",
            "Total number of certificate operations by operation",
        ),
        &["operation"],
    )
    .expect("Failed to create OPERATIONS_TOTAL metric - this should never happen")
});

static OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "app_service_certificate_operation_errors_total",
            "Total number of failed certificate operations by operation and error kind",
        ),
        &["operation", "kind"],
    )
    .expect("Failed to create OPERATION_ERRORS_TOTAL metric - this should never happen")
});

static OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "app_service_certificate_operation_duration_seconds",
            "Duration of certificate operations in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 300.0]),
        &["operation"],
    )
    .expect("Failed to create OPERATION_DURATION metric - this should never happen")
});

static API_REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "app_service_certificate_api_requests_total",
            "Total number of Azure Resource Manager requests",
        ),
        &["api", "method", "status"],
    )
    .expect("Failed to create API_REQUESTS_TOTAL metric - this should never happen")
});

#[allow(
    clippy::missing_errors_doc,
    reason = "Error documentation is provided in doc comments"
)]
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(OPERATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(OPERATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(API_REQUESTS_TOTAL.clone()))?;

    Ok(())
}

pub fn increment_operations(operation: &str) {
    OPERATIONS_TOTAL.with_label_values(&[operation]).inc();
}

pub fn increment_operation_errors(operation: &str, kind: &str) {
    OPERATION_ERRORS_TOTAL
        .with_label_values(&[operation, kind])
        .inc();
}

pub fn observe_operation_duration(operation: &str, duration: f64) {
    OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(duration);
}

/// Record one Resource Manager request; `status` is the HTTP status or `error` for transport failures
pub fn record_api_request(api: &str, method: &str, status: &str) {
    API_REQUESTS_TOTAL
        .with_label_values(&[api, method, status])
        .inc();
}

/// Render every registered metric in the Prometheus text format
///
/// # Errors
/// Returns an error if encoding fails
pub fn gather_text() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
