//! Prometheus metrics for the stock API and the `/metrics` endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const NAMESPACE: &str = "stockroom_json";

/// Upper bounds in seconds. Most reads land well under 50ms; order creation
/// can wait on a row lock up to the configured lock timeout.
const LATENCY_BUCKETS: [f64; 12] = [
    0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct ApiMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
    in_flight: IntGauge,
    conflicts: IntCounterVec,
}

impl ApiMetrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = register(
            &registry,
            IntCounterVec::new(
                opts("http_requests_total", "HTTP requests by method, route and status."),
                &["method", "route", "status_class", "status_code"],
            )?,
        )?;

        let latency = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::from(opts(
                    "http_request_duration_seconds",
                    "HTTP request latency by method and route.",
                ))
                .buckets(LATENCY_BUCKETS.to_vec()),
                &["method", "route"],
            )?,
        )?;

        let in_flight = register(
            &registry,
            IntGauge::with_opts(opts(
                "http_requests_in_flight",
                "HTTP requests currently being handled.",
            ))?,
        )?;

        let conflicts = register(
            &registry,
            IntCounterVec::new(
                opts(
                    "http_conflicts_total",
                    "Requests answered 409 for insufficient stock or a concurrent write.",
                ),
                &["method", "route"],
            )?,
        )?;

        Ok(Self {
            registry,
            requests,
            latency,
            in_flight,
            conflicts,
        })
    }

    fn render(&self) -> Result<(String, HeaderValue), String> {
        let encoder = TextEncoder::new();
        let mut body = Vec::new();

        encoder
            .encode(&self.registry.gather(), &mut body)
            .map_err(|source| format!("failed to encode metrics: {source}"))?;

        let content_type = HeaderValue::from_str(encoder.format_type())
            .map_err(|source| format!("invalid metrics content type: {source}"))?;

        Ok((String::from_utf8_lossy(&body).into_owned(), content_type))
    }
}

fn opts(name: &str, help: &str) -> Opts {
    Opts::new(name, help).namespace(NAMESPACE)
}

fn register<C>(registry: &Registry, collector: C) -> Result<C, prometheus::Error>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

static API_METRICS: OnceLock<Option<ApiMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static ApiMetrics> {
    API_METRICS
        .get_or_init(|| {
            ApiMetrics::new()
                .inspect_err(|source| error!("failed to build metrics registry: {source}"))
                .ok()
        })
        .as_ref()
}

/// Counts a request as in flight until dropped.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    gauge: Option<&'static IntGauge>,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self { gauge }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.gauge {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let code = status_code.to_string();

    metrics
        .requests
        .with_label_values(&[method, route, status_class(status_code), code.as_str()])
        .inc();

    metrics
        .latency
        .with_label_values(&[method, route])
        .observe(duration_seconds);

    if status_code == StatusCode::CONFLICT.as_u16() {
        metrics.conflicts.with_label_values(&[method, route]).inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    match metrics.render() {
        Ok((body, content_type)) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(body);
        }
        Err(message) => {
            error!("{message}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn status_class(status_code: u16) -> &'static str {
    match status_code / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}
