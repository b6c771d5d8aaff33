//! Database Module
//!
//! Embedded SurrealDB connection and schema

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::{Config, DbEngine};
use crate::utils::AppError;

/// SurrealDB namespace
pub const NAMESPACE: &str = "staff";
/// SurrealDB database
pub const DATABASE: &str = "directory";

/// UNIQUE index on `employee.employee_code`
pub const CODE_INDEX: &str = "employee_code_idx";
/// UNIQUE index on `employee.cedula`
pub const CEDULA_INDEX: &str = "employee_cedula_idx";

/// Idempotent schema, applied on every startup
///
/// Uniqueness of employee code and cedula is enforced here so that two
/// concurrent creates cannot both pass the pre-insert checks.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
DEFINE INDEX IF NOT EXISTS employee_code_idx ON TABLE employee FIELDS employee_code UNIQUE;
DEFINE INDEX IF NOT EXISTS employee_cedula_idx ON TABLE employee FIELDS cedula UNIQUE;
DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE INDEX IF NOT EXISTS user_email_idx ON TABLE user FIELDS email;
"#;

/// Database service: owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the engine selected by the configuration
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        match config.db_engine {
            DbEngine::RocksDb => Self::open(&config.database_dir()).await,
            DbEngine::Memory => Self::memory().await,
        }
    }

    /// Open (or create) a RocksDB-backed database at `path`
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        tracing::info!(path = %path.display(), "Database opened (RocksDB)");
        Self::prepare(db).await
    }

    /// Open an in-memory database
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        tracing::info!("Database opened (in-memory)");
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
