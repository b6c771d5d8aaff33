//! 请求日志中间件
//!
//! 每个请求在完成时记录一行：请求 ID、callable 名称 (如有)、状态码和耗时。
//! 健康检查只在 debug 级别记录。

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::StatusCode;

const CALLABLE_PREFIX: &str = "/api/callable/";

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    // SetRequestIdLayer 在外层，请求到这里时一定已有 ID
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let callable = path.strip_prefix(CALLABLE_PREFIX).map(str::to_string);
    let has_token = req.headers().contains_key(http::header::AUTHORIZATION);

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    match (status, callable.as_deref()) {
        (_, None) if path == "/health" && status == StatusCode::OK => {
            tracing::debug!(request_id = %request_id, latency_ms, "Health check");
        }
        (s, callable) if s.is_server_error() => tracing::error!(
            request_id = %request_id,
            %method,
            path = %path,
            callable = callable.unwrap_or("-"),
            has_token,
            status = s.as_u16(),
            latency_ms,
            "Request failed"
        ),
        (s, callable) if s.is_client_error() => tracing::warn!(
            request_id = %request_id,
            %method,
            path = %path,
            callable = callable.unwrap_or("-"),
            has_token,
            status = s.as_u16(),
            latency_ms,
            "Request rejected"
        ),
        (s, callable) => tracing::info!(
            request_id = %request_id,
            %method,
            callable = callable.unwrap_or("-"),
            has_token,
            status = s.as_u16(),
            latency_ms,
            "Request completed"
        ),
    }

    response
}

