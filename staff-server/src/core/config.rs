use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::ServerError;

/// 数据库存储引擎
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbEngine {
    /// 嵌入式 RocksDB (WORK_DIR/database)
    RocksDb,
    /// 内存存储 (进程退出即丢失，用于测试和演示)
    Memory,
}

impl std::str::FromStr for DbEngine {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rocksdb" => Ok(DbEngine::RocksDb),
            "memory" | "mem" => Ok(DbEngine::Memory),
            other => Err(ServerError::Config(format!(
                "DB_ENGINE must be 'rocksdb' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

/// 启动时写入的管理员账号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAdmin {
    pub uid: String,
    pub email: String,
    pub name: String,
}

/// 员工列表分页限制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimits {
    /// 未指定 limit 时的默认值
    pub default: u32,
    /// limit 上限
    pub max: u32,
}

impl Default for ListLimits {
    fn default() -> Self {
        Self {
            default: 50,
            max: 500,
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_HOST | 0.0.0.0 | 监听地址 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | DB_ENGINE | rocksdb | rocksdb / memory |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_TO_FILE | false | 写入 WORK_DIR/logs |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | LIST_LIMIT_DEFAULT | 50 | 员工列表默认条数 |
/// | LIST_LIMIT_MAX | 500 | 员工列表最大条数 |
/// | BOOTSTRAP_ADMIN_UID | - | 启动时写入的管理员 uid |
/// | BOOTSTRAP_ADMIN_EMAIL | - | 启动时写入的管理员邮箱 |
/// | BOOTSTRAP_ADMIN_NAME | Administrator | 启动时写入的管理员姓名 |
///
/// JWT 相关变量见 [`JwtConfig::from_lookup`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/staff HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// 监听地址
    pub http_host: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 数据库存储引擎
    pub db_engine: DbEngine,
    /// 日志级别
    pub log_level: String,
    /// JSON 格式日志
    pub log_json: bool,
    /// 日志写入文件
    pub log_to_file: bool,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 员工列表分页限制
    pub list_limits: ListLimits,
    /// 启动时写入的管理员账号
    pub bootstrap_admin: Option<BootstrapAdmin>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值查找函数加载配置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let production = environment == "production";

        let db_engine = match lookup("DB_ENGINE") {
            Some(engine) => engine.parse()?,
            None => DbEngine::RocksDb,
        };

        let list_limits = ListLimits {
            default: parse_or(&lookup, "LIST_LIMIT_DEFAULT", 50),
            max: parse_or(&lookup, "LIST_LIMIT_MAX", 500),
        };
        if list_limits.default == 0 || list_limits.max < list_limits.default {
            return Err(ServerError::Config(format!(
                "LIST_LIMIT_DEFAULT ({}) must be between 1 and LIST_LIMIT_MAX ({})",
                list_limits.default, list_limits.max
            )));
        }

        let bootstrap_admin = match (
            lookup("BOOTSTRAP_ADMIN_UID").filter(|v| !v.is_empty()),
            lookup("BOOTSTRAP_ADMIN_EMAIL").filter(|v| !v.is_empty()),
        ) {
            (Some(uid), Some(email)) => Some(BootstrapAdmin {
                uid,
                email,
                name: lookup("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|| "Administrator".into()),
            }),
            _ => None,
        };

        let jwt = JwtConfig::from_lookup(&lookup, production)
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            work_dir: lookup("WORK_DIR").unwrap_or_else(|| "./data".into()),
            http_host: lookup("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            http_port: parse_or(&lookup, "HTTP_PORT", 3000),
            environment,
            db_engine,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parse_or(&lookup, "LOG_JSON", false),
            log_to_file: parse_or(&lookup, "LOG_TO_FILE", false),
            request_timeout_ms: parse_or(&lookup, "REQUEST_TIMEOUT_MS", 30000),
            list_limits,
            bootstrap_admin,
            jwt,
        })
    }

    /// 测试配置: 内存数据库 + 固定 JWT 密钥
    pub fn for_tests() -> Self {
        Self {
            work_dir: std::env::temp_dir()
                .join("staff-server-test")
                .to_string_lossy()
                .into_owned(),
            http_host: "127.0.0.1".into(),
            http_port: 0,
            environment: "test".into(),
            db_engine: DbEngine::Memory,
            log_level: "debug".into(),
            log_json: false,
            log_to_file: false,
            request_timeout_ms: 30000,
            list_limits: ListLimits::default(),
            bootstrap_admin: None,
            jwt: JwtConfig {
                secret: "staff-server-test-secret-0123456789abcdef".into(),
                expiration_minutes: 60,
                issuer: "staff-server".into(),
                audience: "staff-clients".into(),
            },
        }
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        if self.db_engine == DbEngine::RocksDb {
            std::fs::create_dir_all(self.database_dir())?;
        }
        if self.log_to_file {
            std::fs::create_dir_all(self.log_dir())?;
        }
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.work_dir, "./data");
        assert_eq!(config.http_host, "0.0.0.0");
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.db_engine, DbEngine::RocksDb);
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.list_limits, ListLimits { default: 50, max: 500 });
        assert!(config.bootstrap_admin.is_none());
        assert!(config.is_development());
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("WORK_DIR", "/srv/staff"),
            ("HTTP_PORT", "8080"),
            ("DB_ENGINE", "memory"),
            ("LOG_JSON", "true"),
            ("LIST_LIMIT_DEFAULT", "20"),
            ("LIST_LIMIT_MAX", "100"),
            ("BOOTSTRAP_ADMIN_UID", "uid-root"),
            ("BOOTSTRAP_ADMIN_EMAIL", "root@example.com"),
        ]))
        .unwrap();

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.db_engine, DbEngine::Memory);
        assert!(config.log_json);
        assert_eq!(config.list_limits, ListLimits { default: 20, max: 100 });
        assert_eq!(config.database_dir(), PathBuf::from("/srv/staff/database"));
        assert_eq!(
            config.bootstrap_admin,
            Some(BootstrapAdmin {
                uid: "uid-root".into(),
                email: "root@example.com".into(),
                name: "Administrator".into(),
            })
        );
    }

    #[test]
    fn test_unparseable_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[("HTTP_PORT", "eighty")])).unwrap();
        assert_eq!(config.http_port, 3000);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("DB_ENGINE", "sqlite")])).is_err());
        assert!(
            Config::from_lookup(lookup_from(&[
                ("LIST_LIMIT_DEFAULT", "600"),
                ("LIST_LIMIT_MAX", "500"),
            ]))
            .is_err()
        );
        assert!(Config::from_lookup(lookup_from(&[("ENVIRONMENT", "production")])).is_err());
    }

    #[test]
    fn test_bootstrap_admin_requires_uid_and_email() {
        let config =
            Config::from_lookup(lookup_from(&[("BOOTSTRAP_ADMIN_UID", "uid-root")])).unwrap();
        assert!(config.bootstrap_admin.is_none());
    }
}
