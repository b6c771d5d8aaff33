//! Staff Server - 员工身份验证与员工档案服务
//!
//! # 架构概述
//!
//! 七个可调用操作 (callable) 共享一个嵌入式文档数据库：
//!
//! - **验证** : `authenticateEmployee`, `verifyEmployeeCode`, `getEmployeeByCode`
//! - **管理** (仅管理员): `createEmployee`, `updateEmployee`,
//!   `deactivateEmployee`, `getEmployees`
//!
//! 所有操作都通过 `POST /api/callable/{name}` 调用。
//!
//! # 模块结构
//!
//! ```text
//! staff-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 调用方识别
//! ├── services/      # 员工目录业务逻辑
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、校验
//! └── db/            # SurrealDB 模型和仓储
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use services::EmployeeDirectory;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode, ErrorKind};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 按配置初始化日志 (级别、JSON、文件输出)
pub fn setup_environment(config: &Config) {
    let log_dir = config.log_to_file.then(|| config.log_dir());
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        log_dir.as_deref().and_then(|p| p.to_str()),
    );
}

pub fn print_banner() {
    println!(
        r#"
   _____ __        ________
  / ___// /_____ _/ __/ __/
  \__ \/ __/ __ `/ /_/ /_
 ___/ / /_/ /_/ / __/ __/
/____/\__/\__,_/_/ /_/
    "#
    );
}
