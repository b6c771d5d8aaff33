//! User Model

use serde::{Deserialize, Serialize};

/// Role value that grants administrative rights
pub const ADMIN_ROLE: &str = "admin";

/// User account fields disclosed after a successful credential check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub department: String,
}

/// User account payload for provisioning
///
/// No callable operation creates users; this is used for the bootstrap
/// administrator and by tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub department: String,
}
