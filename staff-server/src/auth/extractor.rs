//! Caller Extractor
//!
//! Extracts the optional caller identity for callable handlers

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::middleware::authenticate_header;
use crate::core::ServerState;

/// Optional caller identity
///
/// `None` for anonymous calls. Admin-gated operations turn `None` into an
/// unauthenticated error themselves, so handlers never reject on absence.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<CurrentUser>);

impl Caller {
    pub fn user(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }
}

impl FromRequestParts<ServerState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already identified by the middleware
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(Caller(Some(user.clone())));
        }

        let Some(header) = parts.headers.get(http::header::AUTHORIZATION) else {
            return Ok(Caller(None));
        };

        // Router used without the middleware layer
        let header = header.to_str().unwrap_or_default().to_string();
        let user = authenticate_header(&state.get_jwt_service(), &header, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(Caller(Some(user)))
    }
}
