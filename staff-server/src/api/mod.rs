//! API 路由模块
//!
//! # 结构
//!
//! - [`callable`] - 可调用操作 (`POST /api/callable/{name}`)
//! - [`health`] - 健康检查
//! - [`logging`] - 请求日志中间件

pub mod callable;
pub mod health;
pub mod logging;

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::identify_caller;
use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Callable API - caller identity optional, checked per operation
        .merge(callable::router())
        // Health API - public route
        .merge(health::router())
}

/// Build a fully configured application with all middleware and state
///
/// Layers added later wrap the ones added before them.
pub fn build_app(state: &ServerState) -> Router {
    let request_id = HeaderName::from_static("x-request-id");

    build_router()
        // ========== Application Middleware ==========
        // Caller identity (JWT) - innermost, rejects bad tokens before handlers
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            identify_caller,
        ))
        // Request logging
        .layer(axum_middleware::from_fn(logging::logging_middleware))
        // ========== Tower HTTP Middleware ==========
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Timeout
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        // Request ID - outermost, visible to every inner layer
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .with_state(state.clone())
}
