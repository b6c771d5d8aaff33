//! Employee Model

use serde::{Deserialize, Serialize};

/// Full employee data supplied when creating a record
///
/// Fields are not individually validated; missing ones default to empty.
/// `is_active` is accepted for wire compatibility but a new record always
/// starts active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeData {
    pub employee_code: String,
    pub cedula: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial employee update (shallow merge)
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeePatch {
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
}

impl EmployeePatch {
    /// True when no recognised field is set
    pub fn is_empty(&self) -> bool {
        self.employee_code.is_none()
            && self.cedula.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.phone.is_none()
            && self.is_active.is_none()
    }
}

/// Employee profile returned by code lookup (no cedula, email or phone)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub id: String,
    pub employee_code: String,
    pub name: String,
    pub department: String,
    pub position: String,
    pub is_active: bool,
}

/// Employee entry returned by the admin listing (no cedula or phone)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: String,
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub is_active: bool,
}

/// Employee fields disclosed after a successful credential check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBadge {
    pub employee_code: String,
    pub position: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_data_defaults_missing_fields() {
        let data: EmployeeData =
            serde_json::from_value(serde_json::json!({ "employeeCode": "E100", "cedula": "12345" }))
                .unwrap();
        assert_eq!(data.employee_code, "E100");
        assert_eq!(data.cedula, "12345");
        assert_eq!(data.name, "");
        assert_eq!(data.is_active, None);
    }

    #[test]
    fn test_patch_ignores_unknown_keys() {
        let patch: EmployeePatch = serde_json::from_value(serde_json::json!({
            "position": "Supervisor",
            "favouriteColour": "green"
        }))
        .unwrap();
        assert_eq!(patch.position.as_deref(), Some("Supervisor"));
        assert!(!patch.is_empty());

        let empty: EmployeePatch =
            serde_json::from_value(serde_json::json!({ "unknown": 1 })).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = EmployeeProfile {
            id: "abc".into(),
            employee_code: "E100".into(),
            name: "Ana".into(),
            department: "Ops".into(),
            position: "Lead".into(),
            is_active: true,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["employeeCode"], "E100");
        assert_eq!(json["isActive"], true);
        assert!(json.get("cedula").is_none());
    }
}
