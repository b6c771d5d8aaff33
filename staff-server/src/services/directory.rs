//! Employee directory operations
//!
//! The seven callable operations over the `employee` and `user` tables.
//! Each public method runs inside [`guarded`]: classified errors pass
//! through unchanged, anything internal is logged and replaced by the
//! generic internal error.

use std::future::Future;

use shared::Callable;
use shared::callable::{
    AuthenticateEmployeeRequest, AuthenticateEmployeeResponse, CreateEmployeeRequest,
    CreateEmployeeResponse, DeactivateEmployeeRequest, GetEmployeeByCodeRequest,
    GetEmployeeByCodeResponse, GetEmployeesRequest, GetEmployeesResponse, MutationResponse,
    UpdateEmployeeRequest, VerifyEmployeeCodeRequest, VerifyEmployeeCodeResponse,
};
use shared::models::{EmployeeBadge, EmployeeData, EmployeePatch, EmployeeSummary};
use shared::util::{new_document_id, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::access::{require_admin, require_caller};
use crate::auth::CurrentUser;
use crate::core::ListLimits;
use crate::db::CEDULA_INDEX;
use crate::db::models::{EmployeeCreate, EmployeeDeactivation, EmployeeUpdate};
use crate::db::repository::{EmployeeRepository, RepoError, UserRepository};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_IDENTIFIER_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, present, require_all,
    validate_optional_text, validate_text_len,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const CODE_AND_CEDULA_REQUIRED: &str = "Employee code and cedula are required";
const CODE_REQUIRED: &str = "Employee code is required";
const ID_AND_DATA_REQUIRED: &str = "Employee ID and data are required";

/// Employee directory service
#[derive(Clone)]
pub struct EmployeeDirectory {
    employees: EmployeeRepository,
    users: UserRepository,
    limits: ListLimits,
}

impl EmployeeDirectory {
    pub fn new(db: Surreal<Db>, limits: ListLimits) -> Self {
        Self {
            employees: EmployeeRepository::new(db.clone()),
            users: UserRepository::new(db),
            limits,
        }
    }

    // ========================================================================
    // Verification (no caller identity required)
    // ========================================================================

    /// Verify an employee code + cedula pair and resolve the linked user
    pub async fn authenticate_employee(
        &self,
        req: AuthenticateEmployeeRequest,
    ) -> AppResult<AuthenticateEmployeeResponse> {
        guarded(Callable::AuthenticateEmployee, async {
            let [code, cedula] = require_all(
                [("employeeCode", &req.employee_code), ("cedula", &req.cedula)],
                CODE_AND_CEDULA_REQUIRED,
            )?;

            // Same error for unknown code and wrong cedula
            let employee = self
                .employees
                .find_active_by_credentials(code, cedula)
                .await?
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::EmployeeNotFound,
                        "Employee not found or invalid credentials",
                    )
                })?;

            // Soft link: user.email == employee.email
            let user = self
                .users
                .find_by_email(&employee.email)
                .await?
                .ok_or_else(|| AppError::with_message(ErrorCode::UserNotFound, "User not found"))?;

            Ok(AuthenticateEmployeeResponse {
                success: true,
                user: user.into(),
                employee: EmployeeBadge::from(&employee),
            })
        })
        .await
    }

    /// Report whether an active employee holds this code
    pub async fn verify_employee_code(
        &self,
        req: VerifyEmployeeCodeRequest,
    ) -> AppResult<VerifyEmployeeCodeResponse> {
        guarded(Callable::VerifyEmployeeCode, async {
            let [code] = require_all([("employeeCode", &req.employee_code)], CODE_REQUIRED)?;
            let exists = self.employees.find_active_by_code(code).await?.is_some();

            Ok(VerifyEmployeeCodeResponse {
                exists,
                employee_code: code.to_string(),
            })
        })
        .await
    }

    /// Public profile of the active employee holding this code
    pub async fn get_employee_by_code(
        &self,
        req: GetEmployeeByCodeRequest,
    ) -> AppResult<GetEmployeeByCodeResponse> {
        guarded(Callable::GetEmployeeByCode, async {
            let [code] = require_all([("employeeCode", &req.employee_code)], CODE_REQUIRED)?;
            let employee = self
                .employees
                .find_active_by_code(code)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

            Ok(GetEmployeeByCodeResponse {
                success: true,
                employee: employee.into(),
            })
        })
        .await
    }

    // ========================================================================
    // Administration (admin role required)
    // ========================================================================

    /// Create a new, active employee record
    pub async fn create_employee(
        &self,
        caller: Option<&CurrentUser>,
        req: CreateEmployeeRequest,
    ) -> AppResult<CreateEmployeeResponse> {
        guarded(Callable::CreateEmployee, async {
            let caller = require_caller(caller)?;
            let data = req.employee_data.ok_or_else(|| {
                AppError::required("Employee data is required", &["employeeData"])
            })?;

            let admin =
                require_admin(&self.users, caller, "Only administrators can create employees")
                    .await?;
            // Field rules are only reported to administrators
            validate_employee_data(&data)?;

            // Inactive records keep their code and cedula
            if self.employees.find_id_by_code(&data.employee_code).await?.is_some() {
                return Err(code_exists());
            }
            if self.employees.find_id_by_cedula(&data.cedula).await?.is_some() {
                return Err(cedula_exists());
            }

            let id = new_document_id();
            let record = EmployeeCreate::new(data, admin.uid, now_millis());
            self.employees
                .create(&id, record)
                .await
                .map_err(uniqueness_error)?;

            tracing::info!(employee_id = %id, "Employee created");
            Ok(CreateEmployeeResponse {
                success: true,
                employee_id: id,
                message: "Employee created successfully".to_string(),
            })
        })
        .await
    }

    /// Shallow-merge the provided fields into an existing record
    pub async fn update_employee(
        &self,
        caller: Option<&CurrentUser>,
        req: UpdateEmployeeRequest,
    ) -> AppResult<MutationResponse> {
        guarded(Callable::UpdateEmployee, async {
            let caller = require_caller(caller)?;
            let (id, patch) = match (present(&req.employee_id), req.employee_data) {
                (Some(id), Some(patch)) => (id.to_string(), patch),
                (id, patch) => {
                    let mut missing = Vec::new();
                    if id.is_none() {
                        missing.push("employeeId");
                    }
                    if patch.is_none() {
                        missing.push("employeeData");
                    }
                    return Err(AppError::required(ID_AND_DATA_REQUIRED, &missing));
                }
            };

            let admin =
                require_admin(&self.users, caller, "Only administrators can update employees")
                    .await?;
            if patch.is_empty() {
                return Err(AppError::required(ID_AND_DATA_REQUIRED, &["employeeData"]));
            }
            validate_employee_patch(&patch)?;

            if self.employees.find_by_id(&id).await?.is_none() {
                return Err(AppError::new(ErrorCode::EmployeeNotFound));
            }

            // Code and cedula stay unique across records
            if let Some(code) = &patch.employee_code
                && let Some(holder) = self.employees.find_id_by_code(code).await?
                && holder != id
            {
                return Err(code_exists());
            }
            if let Some(cedula) = &patch.cedula
                && let Some(holder) = self.employees.find_id_by_cedula(cedula).await?
                && holder != id
            {
                return Err(cedula_exists());
            }

            let update = EmployeeUpdate::new(patch, admin.uid, now_millis());
            self.employees
                .update(&id, update)
                .await
                .map_err(uniqueness_error)?;

            tracing::info!(employee_id = %id, "Employee updated");
            Ok(MutationResponse::ok("Employee updated successfully"))
        })
        .await
    }

    /// Soft-delete: clear the active flag
    ///
    /// Deactivating an inactive record succeeds and restamps it.
    pub async fn deactivate_employee(
        &self,
        caller: Option<&CurrentUser>,
        req: DeactivateEmployeeRequest,
    ) -> AppResult<MutationResponse> {
        guarded(Callable::DeactivateEmployee, async {
            let caller = require_caller(caller)?;
            let [id] = require_all([("employeeId", &req.employee_id)], "Employee ID is required")?;

            let admin = require_admin(
                &self.users,
                caller,
                "Only administrators can deactivate employees",
            )
            .await?;

            if self.employees.find_by_id(id).await?.is_none() {
                return Err(AppError::new(ErrorCode::EmployeeNotFound));
            }

            self.employees
                .deactivate(id, EmployeeDeactivation::new(admin.uid, now_millis()))
                .await?;

            tracing::info!(employee_id = %id, "Employee deactivated");
            Ok(MutationResponse::ok("Employee deactivated successfully"))
        })
        .await
    }

    /// List employees (active and inactive), ordered by name
    pub async fn get_employees(
        &self,
        caller: Option<&CurrentUser>,
        req: GetEmployeesRequest,
    ) -> AppResult<GetEmployeesResponse> {
        guarded(Callable::GetEmployees, async {
            let caller = require_caller(caller)?;
            require_admin(&self.users, caller, "Only administrators can list employees").await?;

            let limit = self.resolve_limit(req.limit)?;
            let employees: Vec<EmployeeSummary> = self
                .employees
                .list(present(&req.department), limit)
                .await?
                .into_iter()
                .map(EmployeeSummary::from)
                .collect();

            Ok(GetEmployeesResponse {
                success: true,
                total: employees.len(),
                employees,
            })
        })
        .await
    }

    /// Default when absent, at least 1, capped at the configured maximum
    fn resolve_limit(&self, requested: Option<i64>) -> AppResult<u32> {
        match requested {
            None => Ok(self.limits.default),
            Some(n) if n < 1 => Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "Limit must be at least 1",
            )
            .with_detail("limit", n)),
            Some(n) => Ok(n.min(i64::from(self.limits.max)) as u32),
        }
    }
}

/// Error boundary around one callable
async fn guarded<T, F>(callable: Callable, op: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    tracing::debug!(callable = %callable, "Callable started");

    let result = op.await;
    match &result {
        Ok(_) => tracing::debug!(callable = %callable, "Callable completed"),
        Err(err) if err.is_internal() => tracing::error!(
            callable = %callable,
            code = %err.code,
            error = %err.message,
            "Callable failed"
        ),
        Err(err) => tracing::warn!(
            callable = %callable,
            code = %err.code,
            error = %err.message,
            "Callable rejected"
        ),
    }

    result.map_err(AppError::into_public)
}

fn code_exists() -> AppError {
    AppError::new(ErrorCode::EmployeeCodeExists)
}

fn cedula_exists() -> AppError {
    AppError::new(ErrorCode::CedulaExists)
}

/// A write that lost a uniqueness race
fn uniqueness_error(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(msg) if msg.contains(CEDULA_INDEX) => cedula_exists(),
        RepoError::Duplicate(_) => code_exists(),
        other => other.into(),
    }
}

fn validate_employee_data(data: &EmployeeData) -> AppResult<()> {
    let missing: Vec<&str> = [
        ("employeeCode", &data.employee_code),
        ("cedula", &data.cedula),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        return Err(AppError::required(CODE_AND_CEDULA_REQUIRED, &missing));
    }

    validate_text_len(&data.employee_code, "employeeCode", MAX_IDENTIFIER_LEN)?;
    validate_text_len(&data.cedula, "cedula", MAX_IDENTIFIER_LEN)?;
    validate_text_len(&data.name, "name", MAX_NAME_LEN)?;
    validate_text_len(&data.email, "email", MAX_EMAIL_LEN)?;
    validate_text_len(&data.department, "department", MAX_NAME_LEN)?;
    validate_text_len(&data.position, "position", MAX_NAME_LEN)?;
    validate_text_len(&data.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

fn validate_employee_patch(patch: &EmployeePatch) -> AppResult<()> {
    if patch.employee_code.as_deref() == Some("") || patch.cedula.as_deref() == Some("") {
        return Err(AppError::invalid_argument(
            "Employee code and cedula cannot be empty",
        ));
    }

    validate_optional_text(&patch.employee_code, "employeeCode", MAX_IDENTIFIER_LEN)?;
    validate_optional_text(&patch.cedula, "cedula", MAX_IDENTIFIER_LEN)?;
    validate_optional_text(&patch.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&patch.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&patch.department, "department", MAX_NAME_LEN)?;
    validate_optional_text(&patch.position, "position", MAX_NAME_LEN)?;
    validate_optional_text(&patch.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorKind;

    #[test]
    fn test_uniqueness_error_picks_the_violated_index() {
        let err = uniqueness_error(RepoError::Duplicate(format!(
            "Database index `{}` already contains '12345'",
            CEDULA_INDEX
        )));
        assert_eq!(err.code, ErrorCode::CedulaExists);

        let err = uniqueness_error(RepoError::Duplicate(
            "Database index `employee_code_idx` already contains 'E100'".into(),
        ));
        assert_eq!(err.code, ErrorCode::EmployeeCodeExists);
        assert_eq!(err.message, "Employee code already exists");

        let err = uniqueness_error(RepoError::Database("io".into()));
        assert!(err.is_internal());
    }

    #[test]
    fn test_validate_employee_data_requires_code_and_cedula() {
        let err = validate_employee_data(&EmployeeData {
            employee_code: "E100".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.details.unwrap()["fields"], serde_json::json!(["cedula"]));
    }

    #[test]
    fn test_validate_employee_patch_rejects_blank_identifiers() {
        let patch = EmployeePatch {
            cedula: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_employee_patch(&patch).is_err());

        let patch = EmployeePatch {
            name: Some("Ana".into()),
            ..Default::default()
        };
        assert!(validate_employee_patch(&patch).is_ok());
    }

    #[tokio::test]
    async fn test_guarded_conceals_internal_errors() {
        let err = guarded::<(), _>(Callable::GetEmployees, async {
            Err(AppError::database("index corrupted at page 7"))
        })
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Internal server error");

        let err = guarded::<(), _>(Callable::VerifyEmployeeCode, async {
            Err(AppError::required(CODE_REQUIRED, &["employeeCode"]))
        })
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, CODE_REQUIRED);
    }
}
