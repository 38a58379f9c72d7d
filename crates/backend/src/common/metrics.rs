use std::{
    future,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::IntoResponse,
    routing,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use sysinfo::System;

use crate::db::Repository;

const HTTP_DURATION: &str = "http_requests_duration_seconds";

pub async fn track_http(req: Request, next: Next) -> impl IntoResponse {
    let start = Instant::now();
    let path = match req.extensions().get::<MatchedPath>() {
        Some(matched_path) => matched_path.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };
    let method = req.method().clone();

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let labels = [
        ("method", method.to_string()),
        ("path", path),
        ("status", response.status().as_u16().to_string()),
    ];

    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!(HTTP_DURATION, &labels).record(latency);

    response
}

/// Install the global Prometheus recorder and expose it at `/metrics`.
pub fn prometheus_router() -> Result<Router> {
    let handle = setup_metrics_recorder()?;
    Ok(Router::new().route(
        "/metrics",
        routing::get(move || future::ready(handle.render())),
    ))
}

fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    const EXPONENTIAL_SECONDS: &[f64] = &[
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(HTTP_DURATION.to_owned()), EXPONENTIAL_SECONDS)?
        .install_recorder()?;
    Ok(handle)
}

/// Refresh the collection size and host gauges every `interval`.
pub fn spawn_system_metrics(repo: Arc<Repository>, interval: Duration) {
    tokio::spawn(async move {
        let mut sys = System::new();
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            metrics::gauge!("pictures_total").set(repo.count_pictures().await as f64);

            sys.refresh_cpu_usage();
            sys.refresh_memory();
            metrics::gauge!("system_cpu_usage_percent").set(f64::from(sys.global_cpu_usage()));
            metrics::gauge!("system_memory_used_bytes").set(sys.used_memory() as f64);
        }
    });
}
