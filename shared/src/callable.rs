//! Callable operations: names, requests and responses
//!
//! Every operation takes one JSON request object and an implicit caller
//! identity. Request fields are optional at the type level so that a missing
//! field reaches the operation and is reported as an invalid argument,
//! instead of failing deserialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{
    AuthenticatedUser, EmployeeBadge, EmployeeData, EmployeePatch, EmployeeProfile,
    EmployeeSummary,
};

/// Registered callable operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callable {
    AuthenticateEmployee,
    VerifyEmployeeCode,
    GetEmployeeByCode,
    CreateEmployee,
    UpdateEmployee,
    DeactivateEmployee,
    GetEmployees,
}

impl Callable {
    pub const ALL: [Callable; 7] = [
        Callable::AuthenticateEmployee,
        Callable::VerifyEmployeeCode,
        Callable::GetEmployeeByCode,
        Callable::CreateEmployee,
        Callable::UpdateEmployee,
        Callable::DeactivateEmployee,
        Callable::GetEmployees,
    ];

    /// Wire name of the operation
    pub const fn name(&self) -> &'static str {
        match self {
            Callable::AuthenticateEmployee => "authenticateEmployee",
            Callable::VerifyEmployeeCode => "verifyEmployeeCode",
            Callable::GetEmployeeByCode => "getEmployeeByCode",
            Callable::CreateEmployee => "createEmployee",
            Callable::UpdateEmployee => "updateEmployee",
            Callable::DeactivateEmployee => "deactivateEmployee",
            Callable::GetEmployees => "getEmployees",
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error when a callable name is not registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCallable(pub String);

impl fmt::Display for UnknownCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown callable: {}", self.0)
    }
}

impl std::error::Error for UnknownCallable {}

impl FromStr for Callable {
    type Err = UnknownCallable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Callable::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCallable(s.to_string()))
    }
}

// ── Requests ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthenticateEmployeeRequest {
    pub employee_code: Option<String>,
    pub cedula: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyEmployeeCodeRequest {
    pub employee_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetEmployeeByCodeRequest {
    pub employee_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub employee_data: Option<EmployeeData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub employee_id: Option<String>,
    pub employee_data: Option<EmployeePatch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeactivateEmployeeRequest {
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetEmployeesRequest {
    pub department: Option<String>,
    pub limit: Option<i64>,
}

// ── Responses ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticateEmployeeResponse {
    pub success: bool,
    pub user: AuthenticatedUser,
    pub employee: EmployeeBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmployeeCodeResponse {
    pub exists: bool,
    pub employee_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetEmployeeByCodeResponse {
    pub success: bool,
    pub employee: EmployeeProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeResponse {
    pub success: bool,
    pub employee_id: String,
    pub message: String,
}

/// Response of update and deactivate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
}

impl MutationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetEmployeesResponse {
    pub success: bool,
    pub employees: Vec<EmployeeSummary>,
    pub total: usize,
}
