//! 服务层 - 员工目录业务逻辑
//!
//! # 服务列表
//!
//! - [`EmployeeDirectory`] - 七个可调用操作 (验证、查询、管理)
//! - [`access`] - 调用方身份与管理员角色检查

pub mod access;
pub mod directory;

pub use access::Administrator;
pub use directory::EmployeeDirectory;
