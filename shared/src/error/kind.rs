//! Error kind classification
//!
//! Every [`ErrorCode`] belongs to exactly one kind. The kind is what a caller
//! of a callable operation switches on; the code carries the detail.

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Closed set of failure kinds reported by callable operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// A required input was missing or malformed
    InvalidArgument,
    /// No caller identity was presented
    Unauthenticated,
    /// The caller is not allowed to perform the operation
    PermissionDenied,
    /// A referenced entity does not exist
    NotFound,
    /// A uniqueness rule was violated
    AlreadyExists,
    /// Anything unclassified, including store failures
    Internal,
}

impl ErrorKind {
    /// Get the wire name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid-argument",
            Self::Unauthenticated => "unauthenticated",
            Self::PermissionDenied => "permission-denied",
            Self::NotFound => "not-found",
            Self::AlreadyExists => "already-exists",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ErrorCode {
    /// Get the kind for this error code
    ///
    /// `Success` has no failure kind and maps to `Internal` so that a
    /// misuse never leaks as a client error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::ValueOutOfRange => ErrorKind::InvalidArgument,

            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                ErrorKind::Unauthenticated
            }

            Self::PermissionDenied | Self::AdminRequired => ErrorKind::PermissionDenied,

            Self::NotFound
            | Self::EmployeeNotFound
            | Self::UserNotFound
            | Self::CallableNotFound => ErrorKind::NotFound,

            Self::AlreadyExists | Self::EmployeeCodeExists | Self::CedulaExists => {
                ErrorKind::AlreadyExists
            }

            Self::Success
            | Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_code() {
        assert_eq!(ErrorCode::RequiredField.kind(), ErrorKind::InvalidArgument);
        assert_eq!(ErrorCode::InvalidRequest.kind(), ErrorKind::InvalidArgument);
        assert_eq!(ErrorCode::TokenExpired.kind(), ErrorKind::Unauthenticated);
        assert_eq!(ErrorCode::AdminRequired.kind(), ErrorKind::PermissionDenied);
        assert_eq!(ErrorCode::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::CedulaExists.kind(), ErrorKind::AlreadyExists);
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_kind_wire_name() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::PermissionDenied).unwrap(),
            "\"permission-denied\""
        );
        assert_eq!(ErrorKind::AlreadyExists.to_string(), "already-exists");
        let kind: ErrorKind = serde_json::from_str("\"invalid-argument\"").unwrap();
        assert_eq!(kind, ErrorKind::InvalidArgument);
    }
}
