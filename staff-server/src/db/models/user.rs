//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{ADMIN_ROLE, AuthenticatedUser};

/// User document as stored in the `user` table
///
/// The document key is the caller's authenticated uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub role: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub department: String,
}

impl User {
    /// 是否管理员
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

impl From<User> for AuthenticatedUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            department: u.department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_check_is_exact() {
        let mut user: User =
            serde_json::from_value(serde_json::json!({ "id": "u1", "role": "admin" })).unwrap();
        assert!(user.is_admin());

        user.role = "Admin".into();
        assert!(!user.is_admin());

        let no_role: User = serde_json::from_value(serde_json::json!({ "id": "u2" })).unwrap();
        assert!(!no_role.is_admin());
    }
}
