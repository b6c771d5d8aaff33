//! Repository Module
//!
//! Provides the queries behind the callable operations for SurrealDB tables.

pub mod employee;
pub mod user;

// Re-exports
pub use employee::EmployeeRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    /// Classify a store error message
    fn from_store_message(msg: String) -> Self {
        // UNIQUE index violation
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::from_store_message(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 文档键为裸字符串
// =============================================================================
//
//   - 写入/定位: type::thing('employee', $id)
//   - 读取: record::id(id) AS id，模型中的 id 为 String
//
// 调用方只看到裸键 (如 "3f2a..."), 不会看到 "employee:3f2a..."

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
