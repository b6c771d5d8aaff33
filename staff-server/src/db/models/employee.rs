//! Employee Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{EmployeeBadge, EmployeeData, EmployeePatch, EmployeeProfile, EmployeeSummary};

/// Employee document as stored in the `employee` table
///
/// `id` is the bare document key, projected with `record::id(id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub employee_code: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub cedula: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub position: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub phone: String,
    /// Absent or null counts as inactive, matching the `is_active = true` filters
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub deactivated_at: Option<i64>,
    #[serde(default)]
    pub deactivated_by: Option<String>,
}

/// Create employee payload
///
/// Always written with `is_active = true`.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeCreate {
    pub employee_code: String,
    pub cedula: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: i64,
    pub created_by: String,
}

impl EmployeeCreate {
    pub fn new(data: EmployeeData, created_by: impl Into<String>, created_at: i64) -> Self {
        Self {
            employee_code: data.employee_code,
            cedula: data.cedula,
            name: data.name,
            email: data.email,
            department: data.department,
            position: data.position,
            phone: data.phone,
            is_active: true,
            created_at,
            created_by: created_by.into(),
        }
    }
}

/// Update employee payload (shallow merge)
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub updated_at: i64,
    pub updated_by: String,
}

impl EmployeeUpdate {
    pub fn new(patch: EmployeePatch, updated_by: impl Into<String>, updated_at: i64) -> Self {
        Self {
            employee_code: patch.employee_code,
            cedula: patch.cedula,
            name: patch.name,
            email: patch.email,
            department: patch.department,
            position: patch.position,
            phone: patch.phone,
            is_active: patch.is_active,
            updated_at,
            updated_by: updated_by.into(),
        }
    }
}

/// Deactivation stamp
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDeactivation {
    pub is_active: bool,
    pub deactivated_at: i64,
    pub deactivated_by: String,
}

impl EmployeeDeactivation {
    pub fn new(deactivated_by: impl Into<String>, deactivated_at: i64) -> Self {
        Self {
            is_active: false,
            deactivated_at,
            deactivated_by: deactivated_by.into(),
        }
    }
}

impl From<Employee> for EmployeeProfile {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            employee_code: e.employee_code,
            name: e.name,
            department: e.department,
            position: e.position,
            is_active: e.is_active,
        }
    }
}

impl From<Employee> for EmployeeSummary {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            employee_code: e.employee_code,
            name: e.name,
            email: e.email,
            department: e.department,
            position: e.position,
            is_active: e.is_active,
        }
    }
}

impl From<&Employee> for EmployeeBadge {
    fn from(e: &Employee) -> Self {
        Self {
            employee_code: e.employee_code.clone(),
            position: e.position.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Employee {
        serde_json::from_value(serde_json::json!({
            "id": "a1",
            "employee_code": "E100",
            "cedula": "12345",
            "name": "Ana Pérez",
            "email": "ana@example.com",
            "department": "Ops",
            "position": "Clerk",
            "phone": "555-0100",
            "is_active": true
        }))
        .unwrap()
    }

    #[test]
    fn test_projections_drop_sensitive_fields() {
        let profile = serde_json::to_value(EmployeeProfile::from(stored())).unwrap();
        assert!(profile.get("cedula").is_none());
        assert!(profile.get("phone").is_none());
        assert!(profile.get("email").is_none());
        assert_eq!(profile["employeeCode"], "E100");

        let summary = serde_json::to_value(EmployeeSummary::from(stored())).unwrap();
        assert!(summary.get("cedula").is_none());
        assert_eq!(summary["email"], "ana@example.com");
        assert_eq!(summary["isActive"], true);
    }

    #[test]
    fn test_create_overrides_is_active() {
        let data = EmployeeData {
            employee_code: "E100".into(),
            cedula: "12345".into(),
            is_active: Some(false),
            ..Default::default()
        };
        let create = EmployeeCreate::new(data, "uid-admin", 1_700_000_000_000);
        assert!(create.is_active);
        assert_eq!(create.created_by, "uid-admin");
    }

    #[test]
    fn test_update_serializes_only_provided_fields() {
        let patch = EmployeePatch {
            position: Some("Supervisor".into()),
            ..Default::default()
        };
        let update = serde_json::to_value(EmployeeUpdate::new(patch, "uid-admin", 42)).unwrap();
        assert_eq!(
            update,
            serde_json::json!({ "position": "Supervisor", "updated_at": 42, "updated_by": "uid-admin" })
        );
    }

    #[test]
    fn test_missing_fields_get_neutral_values() {
        let e: Employee = serde_json::from_value(serde_json::json!({ "id": "x" })).unwrap();
        assert_eq!(e.employee_code, "");
        assert!(!e.is_active);
        assert!(e.created_at.is_none());
    }
}
