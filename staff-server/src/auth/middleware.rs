//! 认证中间件
//!
//! 为调用方身份识别提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 调用方识别中间件
///
/// 可调用接口允许匿名调用 (验证类接口无需登录)，因此这里不强制登录：
///
/// - 无 `Authorization` 头: 匿名调用，直接放行
/// - `Authorization: Bearer <token>` 且验证通过: 将 [`CurrentUser`] 注入请求扩展
/// - 头格式错误、令牌无效或过期: 直接拒绝，不进入业务逻辑
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 头格式错误 | 401 TokenInvalid |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
pub async fn identify_caller(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .map(|h| h.to_str().unwrap_or_default().to_string());

    let Some(header) = auth_header else {
        return Ok(next.run(req).await);
    };

    let user = authenticate_header(&state.get_jwt_service(), &header, req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// 验证 `Authorization` 头并解析调用方
pub(crate) fn authenticate_header(
    jwt_service: &JwtService,
    header: &str,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let Some(token) = JwtService::extract_from_header(header) else {
        security_log!("WARN", "auth_header_malformed", uri = tracing::field::debug(uri));
        return Err(AppError::invalid_token("Invalid authorization header"));
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => Ok(CurrentUser::from(claims)),
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = tracing::field::display(&e),
                uri = tracing::field::debug(uri)
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
