//! Data models
//!
//! Wire representations shared between staff-server and its clients.
//! Field names are camelCase on the wire.

pub mod employee;
pub mod user;

// Re-exports
pub use employee::*;
pub use user::*;
