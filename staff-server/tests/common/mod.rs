//! Shared fixtures for the integration tests
#![allow(dead_code)]

use shared::callable::CreateEmployeeRequest;
use shared::models::{EmployeeData, UserCreate};
use staff_server::db::repository::{EmployeeRepository, UserRepository};
use staff_server::{Config, CurrentUser, ServerState};

pub const ADMIN_UID: &str = "uid-admin";
pub const CLERK_UID: &str = "uid-clerk";

/// Fresh state on its own in-memory database, with one admin and one
/// non-admin user.
pub async fn test_state() -> ServerState {
    test_state_with(Config::for_tests()).await
}

pub async fn test_state_with(config: Config) -> ServerState {
    let state = ServerState::initialize(&config)
        .await
        .expect("failed to initialize test state");
    seed_user(&state, ADMIN_UID, "admin@example.com", "Ada Admin", "admin").await;
    seed_user(&state, CLERK_UID, "clerk@example.com", "Carl Clerk", "employee").await;
    state
}

pub async fn seed_user(state: &ServerState, uid: &str, email: &str, name: &str, role: &str) {
    UserRepository::new(state.get_db())
        .upsert(
            uid,
            UserCreate {
                email: email.into(),
                name: name.into(),
                role: role.into(),
                department: "HR".into(),
            },
        )
        .await
        .expect("failed to seed user");
}

pub fn admin() -> CurrentUser {
    CurrentUser::new(ADMIN_UID)
}

pub fn clerk() -> CurrentUser {
    CurrentUser::new(CLERK_UID)
}

pub fn employees(state: &ServerState) -> EmployeeRepository {
    EmployeeRepository::new(state.get_db())
}

pub fn employee_data(code: &str, cedula: &str, name: &str, department: &str) -> EmployeeData {
    EmployeeData {
        employee_code: code.into(),
        cedula: cedula.into(),
        name: name.into(),
        email: format!("{}@example.com", code.to_lowercase()),
        department: department.into(),
        position: "Clerk".into(),
        phone: "555-0100".into(),
        is_active: None,
    }
}

/// Create an employee as the admin and return its id
pub async fn create_employee(state: &ServerState, data: EmployeeData) -> String {
    state
        .directory
        .create_employee(
            Some(&admin()),
            CreateEmployeeRequest {
                employee_data: Some(data),
            },
        )
        .await
        .expect("failed to create employee")
        .employee_id
}

/// Bearer token for `uid`, signed with the test configuration
pub fn bearer(state: &ServerState, uid: &str) -> String {
    let token = state
        .get_jwt_service()
        .generate_token(uid, None)
        .expect("failed to sign token");
    format!("Bearer {}", token)
}
