//! 认证模块
//!
//! 提供 JWT 调用方识别：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前调用方身份
//! - [`Caller`] - 可选调用方提取器
//! - [`identify_caller`] - 调用方识别中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use extractor::Caller;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::identify_caller;
