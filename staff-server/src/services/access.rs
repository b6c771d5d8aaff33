//! Caller checks shared by the admin-gated operations

use crate::auth::CurrentUser;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Caller whose user document carried the admin role at check time
///
/// The role is not locked: a revocation after the check does not undo a
/// write that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Administrator {
    pub uid: String,
}

/// Reject anonymous calls
pub fn require_caller(caller: Option<&CurrentUser>) -> AppResult<&CurrentUser> {
    caller.ok_or_else(AppError::not_authenticated)
}

/// Re-read the caller's user document and require `role == "admin"`
///
/// A missing user document is denied the same way as a non-admin role.
pub async fn require_admin(
    users: &UserRepository,
    caller: &CurrentUser,
    denial: &str,
) -> AppResult<Administrator> {
    let user = users.find_by_id(&caller.id).await?;

    match user {
        Some(user) if user.is_admin() => Ok(Administrator {
            uid: caller.id.clone(),
        }),
        other => {
            let role = other.map(|u| u.role);
            security_log!(
                "WARN",
                "admin_required",
                user_id = caller.id.as_str(),
                user_role = role.as_deref().unwrap_or("<no user>")
            );
            Err(AppError::admin_required(denial))
        }
    }
}
