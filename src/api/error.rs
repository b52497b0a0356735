use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::api::validation::{field_errors_json, ErrorResponse};
use crate::db::StoreError;

/// Service-level errors
#[derive(Debug)]
pub enum ServiceError {
    /// Store operation failed
    DatabaseError(StoreError),

    /// Field-level validation failed
    ValidationError(ValidationErrors),

    /// Request was malformed in a way not tied to a single field
    BadRequest(String),

    /// Missing or unknown bearer token
    Unauthorized,

    /// Authenticated, but not allowed to do this
    Forbidden(String),

    /// Resource does not exist or is not visible to the caller
    NotFound(String),

    /// Write collides with existing state
    Conflict(String),

    /// Anything else that is our fault
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::DatabaseError(e) => write!(f, "{}", e),
            ServiceError::ValidationError(e) => write!(f, "Validation error: {}", e),
            ServiceError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ServiceError::Unauthorized => write!(f, "Unauthorized"),
            ServiceError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ServiceError::NotFound(what) => write!(f, "{} not found", what),
            ServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ServiceError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(what) => ServiceError::Conflict(format!("{} already exists", what)),
            StoreError::ForeignKeyViolation(what) => ServiceError::NotFound(capitalize(what)),
            other => ServiceError::DatabaseError(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::ValidationError(errors)
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn message(msg: impl Into<String>) -> serde_json::Value {
    serde_json::json!({"message": msg.into()})
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::DatabaseError(_) | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ValidationError(_) | ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error, fields) = match self {
            ServiceError::DatabaseError(e) => {
                error!("Database error: {}", e);
                ("Failed to process request".to_string(), message("Database error occurred"))
            }
            ServiceError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ("Failed to process request".to_string(), message("Internal error occurred"))
            }
            ServiceError::ValidationError(errors) => {
                warn!("Validation error: {}", errors);
                ("Validation failed".to_string(), field_errors_json(errors))
            }
            ServiceError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                ("Bad request".to_string(), message(msg.as_str()))
            }
            ServiceError::Unauthorized => {
                warn!("Unauthenticated request rejected");
                ("Unauthorized".to_string(), message("Authentication required"))
            }
            ServiceError::Forbidden(msg) => {
                warn!("Forbidden: {}", msg);
                ("Forbidden".to_string(), message(msg.as_str()))
            }
            ServiceError::NotFound(what) => {
                warn!("{} not found", what);
                ("Not found".to_string(), message(format!("{} not found", what)))
            }
            ServiceError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                ("Conflict".to_string(), message(msg.as_str()))
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { error, fields })
    }
}
