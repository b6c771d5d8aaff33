//! JWT 令牌服务
//!
//! 验证调用方携带的 Bearer 令牌并解析出调用方身份。
//! 令牌签发由外部身份服务负责，这里的 [`JwtService::generate_token`]
//! 只用于测试和本地调试。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 密钥最小长度
pub const MIN_SECRET_LEN: usize = 32;

/// 签发者与受众默认值
pub const DEFAULT_ISSUER: &str = "staff-server";
pub const DEFAULT_AUDIENCE: &str = "staff-clients";

/// JWT 配置 (HS256 共享密钥)
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// 本地签发令牌的有效期 (分钟)
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

// 密钥不进日志
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// 从键值查找函数加载 JWT 配置
    ///
    /// - `JWT_SECRET` 未设置: 生产环境报错，其他环境生成临时密钥
    /// - `JWT_SECRET` 少于 32 字符: 报错
    pub fn from_lookup(
        lookup: &impl Fn(&str) -> Option<String>,
        production: bool,
    ) -> Result<Self, JwtError> {
        let secret = match lookup("JWT_SECRET") {
            Some(secret) if secret.len() < MIN_SECRET_LEN => {
                return Err(JwtError::Config(format!(
                    "JWT_SECRET must be at least {} characters long",
                    MIN_SECRET_LEN
                )));
            }
            Some(secret) => secret,
            None if production => {
                return Err(JwtError::Config(
                    "JWT_SECRET must be set when ENVIRONMENT=production".to_string(),
                ));
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using a random key for this process only");
                generate_secure_printable_jwt_secret()?
            }
        };

        Ok(Self {
            secret,
            expiration_minutes: lookup("JWT_EXPIRATION_MINUTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 默认 24 小时
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
        })
    }
}

/// 令牌载荷。`sub` 是 `user` 表文档键，时间戳单位为秒。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("令牌无效: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("签名不匹配")]
    InvalidSignature,

    #[error("令牌签发失败: {0}")]
    GenerationFailed(String),

    #[error("系统随机数不可用")]
    RandomUnavailable,

    #[error("JWT 配置错误: {0}")]
    Config(String),
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> Result<String, JwtError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes).map_err(|_| JwtError::RandomUnavailable)?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect())
}

/// JWT 令牌服务
///
/// 密钥和校验规则在构造时准备好，验证时不再分配。
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            config,
        }
    }

    /// 为用户生成新令牌
    pub fn generate_token(&self, user_id: &str, email: Option<&str>) -> Result<String, JwtError> {
        self.generate_token_valid_for(
            user_id,
            email,
            Duration::minutes(self.config.expiration_minutes),
        )
    }

    /// 生成指定有效期的令牌 (有效期可为负，用于构造过期令牌)
    pub fn generate_token_valid_for(
        &self,
        user_id: &str,
        email: Option<&str>,
        valid_for: Duration,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + valid_for;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.map(str::to_string),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            })?
            .claims;

        // 空 sub 无法对应任何 user 文档
        if claims.sub.is_empty() {
            return Err(JwtError::InvalidToken("empty subject".to_string()));
        }
        Ok(claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
    }
}

/// 当前调用方身份 (从 JWT Claims 解析)
///
/// 只携带身份，不携带角色: 管理员权限在每次调用时从 `user` 文档重新读取。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// 用户 ID (`user` 表文档键)
    pub id: String,
    /// 邮箱 (如果令牌携带)
    pub email: Option<String>,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}
