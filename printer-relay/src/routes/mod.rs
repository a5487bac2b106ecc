use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, StatusCode, header::CONTENT_TYPE};
use axum::middleware as axum_middleware;
use axum::response::IntoResponse;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::server::ServerState;
use crate::server::middleware;

pub mod health;
pub mod print;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Plain-text 404 for unknown paths and unsupported methods on known paths
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, "text/plain")],
        "Not Found",
    )
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(print::router())
        .fallback(not_found)
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: ServerState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    build_router()
        .layer(DefaultBodyLimit::max(max_body_bytes))
        // CORS - preflight short-circuit + headers on every response
        .layer(axum_middleware::from_fn(middleware::cors_middleware))
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - low-level HTTP spans
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Request ID - outermost, so every layer below sees it
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .with_state(state)
}
