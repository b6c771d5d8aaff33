//! Input validation helpers
//!
//! Callable inputs arrive as optional JSON strings. An input is missing when
//! it is absent, `null`, or empty; such inputs never reach the store.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Employee code and cedula
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Names, departments, positions
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Presence ────────────────────────────────────────────────────────

/// Returns the value when it is present and non-empty.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Require every named input, failing with one shared message.
///
/// ```ignore
/// let [code, cedula] = require_all(
///     [("employeeCode", &req.employee_code), ("cedula", &req.cedula)],
///     "Employee code and cedula are required",
/// )?;
/// ```
pub fn require_all<'a, const N: usize>(
    inputs: [(&'static str, &'a Option<String>); N],
    message: &str,
) -> Result<[&'a str; N], AppError> {
    let missing: Vec<&str> = inputs
        .iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::required(message, &missing));
    }
    Ok(inputs.map(|(_, value)| value.as_deref().unwrap_or_default()))
}

// ── Length checks (create/update payloads) ──────────────────────────

/// Validate that a string, if non-empty, is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::invalid_argument(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        validate_text_len(v, field, max_len)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_present_treats_empty_as_missing() {
        assert_eq!(present(&Some("E100".into())), Some("E100"));
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&None), None);
    }

    #[test]
    fn test_require_all_returns_values_in_order() {
        let code = Some("E100".to_string());
        let cedula = Some("12345".to_string());
        let [c, n] = require_all([("employeeCode", &code), ("cedula", &cedula)], "required")
            .unwrap();
        assert_eq!((c, n), ("E100", "12345"));
    }

    #[test]
    fn test_require_all_names_every_missing_field() {
        let code = Some(String::new());
        let cedula = None;
        let err = require_all(
            [("employeeCode", &code), ("cedula", &cedula)],
            "Employee code and cedula are required",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Employee code and cedula are required");
        assert_eq!(
            err.details.unwrap()["fields"],
            serde_json::json!(["employeeCode", "cedula"])
        );
    }

    #[test]
    fn test_validate_text_len_counts_chars() {
        assert!(validate_text_len("Peña", "name", 4).is_ok());
        let err = validate_text_len("Peñas", "name", 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(validate_optional_text(&None, "phone", 1).is_ok());
    }
}
