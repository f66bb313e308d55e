#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

#[cfg(feature = "axum")]
pub mod axum;

use std::fmt;

/// Result type with custom Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error information
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[derive(Debug, Clone)]
pub struct Error {
    /// Type of error and additional information
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub error_type: ErrorType,

    /// Where this error occurred
    pub location: String,
}

/// Single failed field check
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    /// Offending field (or path parameter)
    pub field: String,
    /// Human readable reason
    pub message: String,
}

impl ValidationDetail {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationDetail {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Possible error types
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[derive(Debug, Clone)]
pub enum ErrorType {
    /// This error was not labeled :(
    LabelMe,

    // ? Validation errors
    InvalidId {
        details: Vec<ValidationDetail>,
    },
    FailedValidation {
        details: Vec<ValidationDetail>,
    },
    InvalidOperation {
        details: Vec<ValidationDetail>,
    },

    // ? Missing entities
    UnknownUser,
    UnknownPost,
    UnknownComment,
    UnknownReport,
    UnknownStatus,
    NotFound,

    // ? Authentication
    NotAuthenticated,
    InvalidSession,

    // ? Ownership
    NotOwner,
    NotParticipant,

    // ? Conflicts
    AlreadyReported,
    StatusAlreadyExists,
    DuplicateEntry {
        collection: String,
    },

    // ? Throttling
    Ratelimited,

    // ? Dependencies
    ServiceUnavailable {
        service: String,
    },

    // ? General errors
    DatabaseError {
        operation: String,
        collection: String,
    },
    InternalError,
}

/// Coarse classification of an error, used to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    RateLimited,
    ServiceUnavailable,
    Internal,
}

impl ErrorType {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorType::InvalidId { .. }
            | ErrorType::FailedValidation { .. }
            | ErrorType::InvalidOperation { .. } => ErrorKind::Validation,

            ErrorType::UnknownUser
            | ErrorType::UnknownPost
            | ErrorType::UnknownComment
            | ErrorType::UnknownReport
            | ErrorType::UnknownStatus
            | ErrorType::NotFound => ErrorKind::NotFound,

            ErrorType::NotAuthenticated | ErrorType::InvalidSession => ErrorKind::Unauthorized,

            ErrorType::NotOwner | ErrorType::NotParticipant => ErrorKind::Forbidden,

            ErrorType::AlreadyReported
            | ErrorType::StatusAlreadyExists
            | ErrorType::DuplicateEntry { .. } => ErrorKind::Conflict,

            ErrorType::Ratelimited => ErrorKind::RateLimited,

            ErrorType::ServiceUnavailable { .. } => ErrorKind::ServiceUnavailable,

            ErrorType::LabelMe | ErrorType::DatabaseError { .. } | ErrorType::InternalError => {
                ErrorKind::Internal
            }
        }
    }

    /// Numeric HTTP status for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorType::FailedValidation { .. } => 422,
            _ => match self.kind() {
                ErrorKind::Validation => 400,
                ErrorKind::NotFound => 404,
                ErrorKind::Unauthorized => 401,
                ErrorKind::Forbidden => 403,
                ErrorKind::Conflict => 409,
                ErrorKind::RateLimited => 429,
                ErrorKind::ServiceUnavailable => 503,
                ErrorKind::Internal => 500,
            },
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::LabelMe => write!(f, "Something went wrong"),
            ErrorType::InvalidId { .. } => write!(f, "Invalid id"),
            ErrorType::FailedValidation { .. } => write!(f, "Validation failed"),
            ErrorType::InvalidOperation { .. } => write!(f, "Invalid operation"),
            ErrorType::UnknownUser => write!(f, "User not found"),
            ErrorType::UnknownPost => write!(f, "Post not found"),
            ErrorType::UnknownComment => write!(f, "Comment not found"),
            ErrorType::UnknownReport => write!(f, "Report not found"),
            ErrorType::UnknownStatus => write!(f, "Status not found"),
            ErrorType::NotFound => write!(f, "Not found"),
            ErrorType::NotAuthenticated => write!(f, "Unauthorized: No token provided"),
            ErrorType::InvalidSession => write!(f, "Unauthorized: Invalid token"),
            ErrorType::NotOwner => write!(f, "You are not the owner of this resource"),
            ErrorType::NotParticipant => write!(f, "You are not part of this conversation"),
            ErrorType::AlreadyReported => write!(f, "You have already reported this"),
            ErrorType::StatusAlreadyExists => write!(f, "Status already exists"),
            ErrorType::DuplicateEntry { collection } => {
                write!(f, "Duplicate entry in {collection}")
            }
            ErrorType::Ratelimited => write!(f, "Too many requests, please try again later"),
            ErrorType::ServiceUnavailable { service } => {
                write!(f, "Service unavailable: {service}")
            }
            ErrorType::DatabaseError { .. } => write!(f, "Database error"),
            ErrorType::InternalError => write!(f, "Internal server error"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error_type, self.location)
    }
}

impl std::error::Error for Error {}

#[macro_export]
macro_rules! create_error {
    ( $error: ident $( $tt:tt )? ) => {
        $crate::Error {
            error_type: $crate::ErrorType::$error $( $tt )?,
            location: format!("{}:{}:{}", file!(), line!(), column!()),
        }
    };
}

#[macro_export]
macro_rules! create_database_error {
    ( $operation: expr, $collection: expr ) => {
        $crate::create_error!(DatabaseError {
            operation: $operation.to_string(),
            collection: $collection.to_string()
        })
    };
}

/// Build a validation error with a single detail entry
#[macro_export]
macro_rules! validation_error {
    ( $variant: ident, $field: expr, $message: expr ) => {
        $crate::create_error!($variant {
            details: vec![$crate::ValidationDetail::new($field, $message)]
        })
    };
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, ErrorType};

    #[test]
    fn use_macro_to_construct_error() {
        let error = create_error!(LabelMe);
        assert!(matches!(error.error_type, ErrorType::LabelMe));
        assert!(error.location.contains("lib.rs"));
    }

    #[test]
    fn use_macro_to_construct_complex_error() {
        let error = create_error!(ServiceUnavailable {
            service: "database".to_string()
        });

        assert_eq!(error.error_type.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(error.error_type.status_code(), 503);
    }

    #[test]
    fn validation_errors_carry_details() {
        let error = validation_error!(InvalidId, "id", "not a valid id");
        match &error.error_type {
            ErrorType::InvalidId { details } => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "id");
            }
            _ => panic!("unexpected error type"),
        }

        assert_eq!(error.error_type.status_code(), 400);
        assert_eq!(
            validation_error!(FailedValidation, "title", "required")
                .error_type
                .status_code(),
            422
        );
    }

    #[test]
    fn conflicts_map_to_409() {
        for error_type in [
            ErrorType::AlreadyReported,
            ErrorType::StatusAlreadyExists,
            ErrorType::DuplicateEntry {
                collection: "users".to_string(),
            },
        ] {
            assert_eq!(error_type.kind(), ErrorKind::Conflict);
            assert_eq!(error_type.status_code(), 409);
        }
    }
}
