//! Prometheus metrics for recognition-service.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// Prediction metrics
pub static PREDICT_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static INFERENCE_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PREDICTIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PREPROCESS_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup.
pub fn init_metrics() {
    let registry = Registry::new();

    // Prediction request counter
    let predict_requests = IntCounterVec::new(
        Opts::new(
            "predict_requests_total",
            "Total number of prediction requests",
        ),
        &["endpoint", "outcome"], // outcome: ok, bad_input, error
    )
    .expect("Failed to create predict_requests_total metric");

    // Inference latency histogram
    let inference_latency = HistogramVec::new(
        HistogramOpts::new(
            "inference_latency_seconds",
            "Forward-pass latency in seconds",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["backend"],
    )
    .expect("Failed to create inference_latency_seconds metric");

    // Per-label prediction counter
    let predictions = IntCounterVec::new(
        Opts::new("predictions_total", "Total predictions by class label"),
        &["label"],
    )
    .expect("Failed to create predictions_total metric");

    // Preprocessing error counter
    let preprocess_errors = IntCounterVec::new(
        Opts::new(
            "preprocess_errors_total",
            "Total image preprocessing failures",
        ),
        &["error_type"],
    )
    .expect("Failed to create preprocess_errors_total metric");

    // Register all metrics
    registry
        .register(Box::new(predict_requests.clone()))
        .expect("Failed to register predict_requests_total");
    registry
        .register(Box::new(inference_latency.clone()))
        .expect("Failed to register inference_latency_seconds");
    registry
        .register(Box::new(predictions.clone()))
        .expect("Failed to register predictions_total");
    registry
        .register(Box::new(preprocess_errors.clone()))
        .expect("Failed to register preprocess_errors_total");

    // Initialize globals
    let _ = REGISTRY.set(registry);
    let _ = PREDICT_REQUESTS_TOTAL.set(predict_requests);
    let _ = INFERENCE_LATENCY_SECONDS.set(inference_latency);
    let _ = PREDICTIONS_TOTAL.set(predictions);
    let _ = PREPROCESS_ERRORS_TOTAL.set(preprocess_errors);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a completed prediction request.
pub fn record_predict_request(endpoint: &str, outcome: &str) {
    if let Some(counter) = PREDICT_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[endpoint, outcome]).inc();
    }
}

/// Record forward-pass latency.
pub fn record_inference_latency(backend: &str, duration_secs: f64) {
    if let Some(histogram) = INFERENCE_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[backend])
            .observe(duration_secs);
    }
}

/// Record a predicted class label.
pub fn record_prediction(label: &str) {
    if let Some(counter) = PREDICTIONS_TOTAL.get() {
        counter.with_label_values(&[label]).inc();
    }
}

/// Record a preprocessing failure.
pub fn record_preprocess_error(error_type: &str) {
    if let Some(counter) = PREPROCESS_ERRORS_TOTAL.get() {
        counter.with_label_values(&[error_type]).inc();
    }
}
