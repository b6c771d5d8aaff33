//! Callable API Module
//!
//! Every operation is reached through one route: `POST /api/callable/{name}`.

mod handler;

pub use handler::execute;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Callable router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/callable/{name}", post(handler::invoke))
}
