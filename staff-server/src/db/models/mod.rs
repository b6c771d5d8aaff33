//! Database Models

// Serde helpers
pub mod serde_helpers;

pub mod employee;
pub mod user;

// Re-exports
pub use employee::{Employee, EmployeeCreate, EmployeeDeactivation, EmployeeUpdate};
pub use user::User;
pub use shared::models::UserCreate;
