use std::sync::Arc;
use std::time::Instant;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::db::models::UserCreate;
use crate::db::repository::UserRepository;
use crate::services::EmployeeDirectory;
use shared::models::ADMIN_ROLE;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 克隆句柄实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | directory | EmployeeDirectory | 员工目录服务 (七个可调用操作) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | started_at | Instant | 启动时间 (健康检查) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 员工目录服务
    pub directory: EmployeeDirectory,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 启动时间
    pub started_at: Instant,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        let directory = EmployeeDirectory::new(db.clone(), config.list_limits);
        Self {
            config,
            db,
            directory,
            jwt_service,
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (RocksDB: work_dir/database，或内存) 与 schema
    /// 3. 启动管理员账号 (如果配置)
    /// 4. JWT 服务与员工目录服务
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        config.ensure_work_dir_structure()?;

        let db_service = DbService::new(config).await?;
        let db = db_service.db;

        if let Some(admin) = &config.bootstrap_admin {
            UserRepository::new(db.clone())
                .upsert(
                    &admin.uid,
                    UserCreate {
                        email: admin.email.clone(),
                        name: admin.name.clone(),
                        role: ADMIN_ROLE.to_string(),
                        department: String::new(),
                    },
                )
                .await
                .map_err(|e| ServerError::Database(e.to_string()))?;
            tracing::info!(uid = %admin.uid, email = %admin.email, "Bootstrap administrator ensured");
        }

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db, jwt_service))
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
