//! 统一错误处理
//!
//! 错误类型统一定义在 `shared::error`，这里负责：
//! - 重新导出 [`AppError`] / [`ApiResponse`] / [`ErrorCode`]
//! - 仓储层错误 [`RepoError`] 到 [`AppError`] 的转换
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::with_message(ErrorCode::EmployeeNotFound, "Employee not found"))
//!
//! // 返回成功响应
//! Ok(ok(data))
//! ```

use axum::Json;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode, ErrorKind};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

// ========== Helper functions ==========

/// 成功响应 (`code = 0`)
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}
