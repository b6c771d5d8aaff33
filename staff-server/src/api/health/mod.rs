//! 健康检查路由
//!
//! `GET /health` (无需认证) 返回服务状态与数据库探测结果：
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42,
//!   "checks": { "database": { "status": "ok", "latency_ms": 1 } }
//! }
//! ```
//!
//! 数据库不可用时仍返回 200，`status` 为 `degraded`。

use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: Overall,
    version: &'static str,
    uptime_seconds: u64,
    checks: HealthChecks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Overall {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    database: Probe,
}

/// 单项探测结果
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Probe {
    Ok { latency_ms: u64 },
    Error { message: String },
}

impl Probe {
    fn is_ok(&self) -> bool {
        matches!(self, Probe::Ok { .. })
    }
}

async fn probe_database(state: &ServerState) -> Probe {
    let start = Instant::now();
    match state.get_db().health().await {
        Ok(()) => Probe::Ok {
            latency_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            Probe::Error {
                message: "Database unavailable".to_string(),
            }
        }
    }
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = probe_database(&state).await;
    let status = if database.is_ok() {
        Overall::Healthy
    } else {
        Overall::Degraded
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        checks: HealthChecks { database },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_wire_shape() {
        let json = serde_json::to_value(Probe::Ok { latency_ms: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ok", "latency_ms": 3 }));

        let json = serde_json::to_value(Probe::Error {
            message: "Database unavailable".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("latency_ms").is_none());
    }
}
