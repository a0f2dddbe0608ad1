use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderName, Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{info_span, Level};

use crate::handlers::{health_handler, redirect_handler, save_url_handler};
use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct App {}

impl App {
    /// Builds the router. `timeout` bounds every request, including the
    /// storage call it makes.
    pub fn router(state: AppState, timeout: Duration) -> Router {
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|value| value.to_str().ok())
                            .unwrap_or_default();
                        info_span!(
                            "request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id,
                        )
                    })
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            ));

        Router::new()
            .route("/health", get(health_handler))
            .route("/url", post(save_url_handler))
            .route("/{alias}", get(redirect_handler))
            .layer(middleware)
            .with_state(state)
    }
}
