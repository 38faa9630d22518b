//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use std::sync::Once;

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("xfeed_http_requests_total", "Total number of HTTP requests"),
        &["method", "endpoint", "status"]
    ).expect("metric can be created");
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "xfeed_http_request_duration_seconds",
            "HTTP request duration in seconds"
        ).buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["method", "endpoint"]
    ).expect("metric can be created");

    // Upstream Metrics
    pub static ref UPSTREAM_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("xfeed_upstream_requests_total", "Total number of requests sent to the X API"),
        &["endpoint", "outcome"]
    ).expect("metric can be created");
    pub static ref FALLBACK_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("xfeed_fallback_total", "Total number of per-account fallbacks to generated posts"),
        &["reason"]
    ).expect("metric can be created");

    // Cache Metrics
    pub static ref CACHE_HITS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("xfeed_cache_hits_total", "Total number of cache hits"),
        &["cache_name"]
    ).expect("metric can be created");
    pub static ref CACHE_MISSES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("xfeed_cache_misses_total", "Total number of cache misses"),
        &["cache_name"]
    ).expect("metric can be created");
    pub static ref CACHE_SIZE: IntGauge = IntGauge::new(
        "xfeed_cache_size",
        "Number of posts held by the aggregate cache"
    ).expect("metric can be created");
    pub static ref CACHE_REFRESH_DURATION_SECONDS: prometheus::Histogram = prometheus::Histogram::with_opts(
        HistogramOpts::new(
            "xfeed_cache_refresh_duration_seconds",
            "Time spent rebuilding the aggregate feed"
        ).buckets(vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0])
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("xfeed_errors_total", "Total number of errors"),
        &["error_type", "endpoint"]
    ).expect("metric can be created");
}

static INIT: Once = Once::new();

/// Initialize metrics registry.
///
/// Safe to call more than once; registration only happens on the first call.
pub fn init_metrics() {
    INIT.call_once(|| {
        REGISTRY
            .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
            .expect("HTTP_REQUESTS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
            .expect("HTTP_REQUEST_DURATION_SECONDS can be registered");
        REGISTRY
            .register(Box::new(UPSTREAM_REQUESTS_TOTAL.clone()))
            .expect("UPSTREAM_REQUESTS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(FALLBACK_TOTAL.clone()))
            .expect("FALLBACK_TOTAL can be registered");
        REGISTRY
            .register(Box::new(CACHE_HITS_TOTAL.clone()))
            .expect("CACHE_HITS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(CACHE_MISSES_TOTAL.clone()))
            .expect("CACHE_MISSES_TOTAL can be registered");
        REGISTRY
            .register(Box::new(CACHE_SIZE.clone()))
            .expect("CACHE_SIZE can be registered");
        REGISTRY
            .register(Box::new(CACHE_REFRESH_DURATION_SECONDS.clone()))
            .expect("CACHE_REFRESH_DURATION_SECONDS can be registered");
        REGISTRY
            .register(Box::new(ERRORS_TOTAL.clone()))
            .expect("ERRORS_TOTAL can be registered");

        tracing::info!("Metrics registry initialized");
    });
}
