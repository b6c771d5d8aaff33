//! Shared types for the staff directory
//!
//! Common types used by the server and its clients: the error taxonomy,
//! wire models, and callable request/response structures.

pub mod callable;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use callable::Callable;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode, ErrorKind};
