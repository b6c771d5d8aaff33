//! Unified error system for the staff directory
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`ErrorKind`]: The closed set of failure kinds callers switch on
//! - [`AppError`]: Rich error type with code, message, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 8xxx: Employee directory errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ApiResponse, ErrorCode, ErrorKind};
//!
//! let err = AppError::with_message(ErrorCode::EmployeeCodeExists, "Employee code already exists");
//! assert_eq!(err.kind(), ErrorKind::AlreadyExists);
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(8002));
//! ```

mod codes;
mod http;
mod kind;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use kind::ErrorKind;
pub use types::{ApiResponse, AppError, AppResult};
