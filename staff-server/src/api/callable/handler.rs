//! Callable API Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::Callable;

use crate::auth::{Caller, CurrentUser};
use crate::core::ServerState;
use crate::services::EmployeeDirectory;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

/// Invoke a callable by name
///
/// The body is the request object; an empty body counts as `{}`.
pub async fn invoke(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    caller: Caller,
    body: Bytes,
) -> AppResult<Json<ApiResponse<Value>>> {
    let callable: Callable = name.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::CallableNotFound,
            format!("Callable '{}' not found", name),
        )
        .with_detail("callable", name.clone())
    })?;

    let payload = parse_payload(&body)?;
    let data = execute(&state.directory, callable, caller.user(), payload).await?;
    Ok(ok(data))
}

/// Decode the payload for `callable`, run it, and encode the response
pub async fn execute(
    directory: &EmployeeDirectory,
    callable: Callable,
    caller: Option<&CurrentUser>,
    payload: Value,
) -> AppResult<Value> {
    match callable {
        Callable::AuthenticateEmployee => {
            encode(directory.authenticate_employee(decode(payload)?).await?)
        }
        Callable::VerifyEmployeeCode => {
            encode(directory.verify_employee_code(decode(payload)?).await?)
        }
        Callable::GetEmployeeByCode => {
            encode(directory.get_employee_by_code(decode(payload)?).await?)
        }
        Callable::CreateEmployee => {
            encode(directory.create_employee(caller, decode(payload)?).await?)
        }
        Callable::UpdateEmployee => {
            encode(directory.update_employee(caller, decode(payload)?).await?)
        }
        Callable::DeactivateEmployee => {
            encode(directory.deactivate_employee(caller, decode(payload)?).await?)
        }
        Callable::GetEmployees => encode(directory.get_employees(caller, decode(payload)?).await?),
    }
}

fn parse_payload(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::invalid_request(format!("Malformed JSON body: {}", e)))?;

    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Ok(Value::Object(Default::default())),
        _ => Err(AppError::invalid_request(
            "Request body must be a JSON object",
        )),
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> AppResult<T> {
    serde_json::from_value(payload)
        .map_err(|e| AppError::invalid_request(format!("Invalid request: {}", e)))
}

fn encode<T: Serialize>(response: T) -> AppResult<Value> {
    serde_json::to_value(response)
        .map_err(|e| AppError::internal(format!("Failed to encode response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorKind;

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload(b"").unwrap(), serde_json::json!({}));
        assert_eq!(parse_payload(b"  \n").unwrap(), serde_json::json!({}));
        assert_eq!(parse_payload(b"null").unwrap(), serde_json::json!({}));
        assert_eq!(
            parse_payload(br#"{"employeeCode":"E100"}"#).unwrap()["employeeCode"],
            "E100"
        );

        let err = parse_payload(b"{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = parse_payload(b"[1,2]").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn test_decode_rejects_wrong_field_types() {
        let err = decode::<shared::callable::GetEmployeesRequest>(
            serde_json::json!({ "limit": "ten" }),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
