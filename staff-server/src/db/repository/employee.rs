//! Employee Repository

use super::{BaseRepository, RepoResult};
use crate::db::models::{Employee, EmployeeCreate, EmployeeDeactivation, EmployeeUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Explicit projection so the record id comes back as a bare key
const EMPLOYEE_FIELDS: &str = "record::id(id) AS id, employee_code, cedula, name, email, \
    department, position, phone, is_active, created_at, created_by, updated_at, updated_by, \
    deactivated_at, deactivated_by";

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the active employee matching both code and cedula
    pub async fn find_active_by_credentials(
        &self,
        employee_code: &str,
        cedula: &str,
    ) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {EMPLOYEE_FIELDS} FROM employee \
                 WHERE employee_code = $code AND cedula = $cedula AND is_active = true LIMIT 1"
            ))
            .bind(("code", employee_code.to_string()))
            .bind(("cedula", cedula.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Find the active employee with this code
    pub async fn find_active_by_code(&self, employee_code: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {EMPLOYEE_FIELDS} FROM employee \
                 WHERE employee_code = $code AND is_active = true LIMIT 1"
            ))
            .bind(("code", employee_code.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Find employee by document key, active or not
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {EMPLOYEE_FIELDS} FROM type::thing('employee', $id)"
            ))
            .bind(("id", id.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Key of the record holding this code, active or not
    pub async fn find_id_by_code(&self, employee_code: &str) -> RepoResult<Option<String>> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE record::id(id) FROM employee WHERE employee_code = $code LIMIT 1")
            .bind(("code", employee_code.to_string()))
            .await?;
        let ids: Vec<String> = result.take(0)?;
        Ok(ids.into_iter().next())
    }

    /// Key of the record holding this cedula, active or not
    pub async fn find_id_by_cedula(&self, cedula: &str) -> RepoResult<Option<String>> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE record::id(id) FROM employee WHERE cedula = $cedula LIMIT 1")
            .bind(("cedula", cedula.to_string()))
            .await?;
        let ids: Vec<String> = result.take(0)?;
        Ok(ids.into_iter().next())
    }

    /// Insert a new employee under the given key
    ///
    /// A UNIQUE index violation surfaces as `RepoError::Duplicate`.
    pub async fn create(&self, id: &str, data: EmployeeCreate) -> RepoResult<()> {
        self.base
            .db()
            .query("CREATE type::thing('employee', $id) CONTENT $data RETURN NONE")
            .bind(("id", id.to_string()))
            .bind(("data", data))
            .await?
            .check()?;
        Ok(())
    }

    /// Shallow-merge the provided fields into an existing employee
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE type::thing('employee', $id) MERGE $data RETURN NONE")
            .bind(("id", id.to_string()))
            .bind(("data", data))
            .await?
            .check()?;
        Ok(())
    }

    /// Clear the active flag and stamp the deactivation
    pub async fn deactivate(&self, id: &str, data: EmployeeDeactivation) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE type::thing('employee', $id) MERGE $data RETURN NONE")
            .bind(("id", id.to_string()))
            .bind(("data", data))
            .await?
            .check()?;
        Ok(())
    }

    /// List employees, active and inactive, ordered by name
    pub async fn list(&self, department: Option<&str>, limit: u32) -> RepoResult<Vec<Employee>> {
        let filter = if department.is_some() {
            " WHERE department = $department"
        } else {
            ""
        };
        let mut query = self
            .base
            .db()
            .query(format!(
                "SELECT {EMPLOYEE_FIELDS} FROM employee{filter} ORDER BY name ASC LIMIT $limit"
            ))
            .bind(("limit", limit));
        if let Some(department) = department {
            query = query.bind(("department", department.to_string()));
        }
        let employees: Vec<Employee> = query.await?.take(0)?;
        Ok(employees)
    }
}
