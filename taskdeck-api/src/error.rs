/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to a
/// structured JSON error body with the appropriate status code.
///
/// # Status mapping
///
/// - `BadRequest`, `ValidationError`, `Conflict` map to 400 (a duplicate
///   username is reported as 400, matching the protocol this service
///   replaces rather than the more common 409)
/// - `Unauthorized` (missing token, wrong password) maps to 401
/// - `Forbidden` (invalid or expired token) maps to 403
/// - `NotFound` (unknown user, assignee, task, or route) maps to 404
/// - `InternalError` maps to 500 with a generic message; the detail is
///   logged server-side and never sent to the client

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use taskdeck_shared::auth::jwt::JwtError;
use taskdeck_shared::auth::middleware::AuthError;
use taskdeck_shared::policy::PolicyError;
use taskdeck_shared::store::{CredentialError, StoreError, TaskError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request (400)
    BadRequest(String),

    /// Required field missing or invalid (400)
    ValidationError(Vec<ValidationErrorDetail>),

    /// Duplicate username (400)
    Conflict(String),

    /// Missing token or failed password check (401)
    Unauthorized(String),

    /// Invalid or expired token (403)
    Forbidden(String),

    /// Unknown user, task, or route (404)
    NotFound(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "conflict", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Required fields are missing or invalid".to_string(),
                Some(errors),
            ),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, "conflict", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert request validation failures to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}

/// Convert credential errors to API errors
impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::UserExists(_) => {
                ApiError::Conflict("User already exists".to_string())
            }
            CredentialError::UserNotFound(_) => {
                ApiError::NotFound("User does not exist".to_string())
            }
            CredentialError::BadPassword => {
                ApiError::Unauthorized("Incorrect password".to_string())
            }
            CredentialError::Hash(e) => ApiError::InternalError(e.to_string()),
            CredentialError::Store(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

/// Convert task store errors to API errors
impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => ApiError::NotFound(format!("Task {} does not exist", id)),
            TaskError::Store(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

/// Convert policy errors to API errors
impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::UnknownAssignee(user) => {
                ApiError::NotFound(format!("Assignee {} is not a registered user", user))
            }
            PolicyError::Credential(e) => ApiError::from(e),
        }
    }
}

/// Convert credential extraction errors to API errors
///
/// A missing token is 401; anything else about the header is a bad
/// request.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::Unauthorized("Token required".to_string()),
            AuthError::InvalidHeader => {
                ApiError::BadRequest("Invalid authorization header".to_string())
            }
        }
    }
}

/// Convert token errors to API errors
///
/// A token that fails verification is 403; failing to mint one is an
/// internal fault.
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Forbidden("Token expired".to_string()),
            JwtError::InvalidIssuer => ApiError::Forbidden("Invalid token issuer".to_string()),
            JwtError::ValidationError(_) => ApiError::Forbidden("Invalid token".to_string()),
            JwtError::CreateError(e) => ApiError::InternalError(e),
        }
    }
}

/// Convert raw storage errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
