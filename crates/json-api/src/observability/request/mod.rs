//! Request-level logging, request IDs and HTTP metrics.

mod request_ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let route = spans::route_label(&path);
    let remote_addr = req.remote_addr().to_string();
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        request_id = %request_id,
        method = %method,
        path = %path,
        route = %route,
        remote_addr = %remote_addr,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let duration = started.elapsed();
    let status = request_ids::response_status_or_ok(res.status_code);
    let duration_ms = duration.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    metrics::observe_request(&method, &route, status.as_u16(), duration.as_secs_f64());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status.as_u16(), duration_ms, "request.completed");

        if status.is_server_error() {
            error!(
                status = status.as_u16(),
                method = %method,
                path = %path,
                request_id = %request_id,
                "server error response"
            );
        } else if status.is_client_error() {
            warn!(
                status = status.as_u16(),
                method = %method,
                path = %path,
                request_id = %request_id,
                "client error response"
            );
        }

        if duration_ms > threshold_ms {
            warn!(
                method = %method,
                path = %path,
                request_id = %request_id,
                duration_ms,
                threshold_ms,
                "slow request detected"
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("ping").get(ok)),
        )
    }

    #[tokio::test]
    async fn generates_a_request_id_when_none_is_sent() -> TestResult {
        let mut res = TestClient::get("http://example.com/ping")
            .send(&make_service())
            .await;

        let request_id = res
            .headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            request_id.is_some_and(|id| !id.is_empty()),
            "expected a generated request id"
        );
        assert_eq!(res.take_string().await?, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn echoes_the_callers_request_id() {
        let res = TestClient::get("http://example.com/ping")
            .add_header(request_ids::REQUEST_ID_HEADER, "req-123", true)
            .send(&make_service())
            .await;

        let request_id = res
            .headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        assert_eq!(request_id, Some("req-123"));
    }
}
