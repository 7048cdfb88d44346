//! API error handling module
//!
//! Provides the single translator from failures to JSON error responses.
//! Every error body has the shape `{status: "error", message, code, details?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quantumlink_core::CoreError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// API error type with structured variants for different error categories
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller-supplied data violates a documented constraint
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No credential in the request
    #[error("Authorization token required")]
    Unauthorized,

    /// Credential present but not resolvable to a user
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Package exists but belongs to someone else
    #[error("Access to package '{0}' denied")]
    Forbidden(String),

    /// Package id not present in the store
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// No route matches the request path
    #[error("Endpoint not found")]
    RouteNotFound,

    /// Known path, unsupported HTTP verb
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Internal server error - unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Collaborator failure (encoder, store, authenticator backend)
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

/// JSON body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always "error"
    #[schema(example = "error")]
    pub status: &'static str,
    /// Human-readable summary
    #[schema(example = "Invalid input data")]
    pub message: String,
    /// Stable machine-readable code
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Raw validation detail (validation errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "The 'message' field must be a non-empty string")]
    pub details: Option<String>,
}

impl ApiError {
    /// Create a validation error
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::PackageNotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) | Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::PackageNotFound(_) => "PACKAGE_NOT_FOUND",
            Self::RouteNotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::Internal(_) | Self::Core(_) => "INTERNAL_ERROR",
        }
    }

    /// Get sanitized error message for client response
    fn client_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid input data",
            Self::Unauthorized => "Authorization token required",
            Self::InvalidToken => "Invalid or expired token",
            Self::Forbidden(_) => "You do not have permission to access this package",
            Self::PackageNotFound(_) => "Package not found",
            Self::RouteNotFound => "Endpoint not found",
            Self::MethodNotAllowed => "HTTP method not allowed",
            Self::Internal(_) | Self::Core(_) => "Internal server error",
        }
    }

    /// Detail echoed to the caller. Only validation failures carry one.
    fn client_details(&self) -> Option<String> {
        match self {
            Self::Validation(detail) => Some(detail.clone()),
            _ => None,
        }
    }

    /// Get the error category for logging
    fn error_category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Unauthorized | Self::InvalidToken => "auth",
            Self::Forbidden(_) => "forbidden",
            Self::PackageNotFound(_) | Self::RouteNotFound => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Internal(_) => "internal",
            Self::Core(_) => "core",
        }
    }

    /// Build the response body without logging
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status: "error",
            message: self.client_message().to_string(),
            code: self.error_code(),
            details: self.client_details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.error_category();
        let code = self.error_code();
        let internal_message = self.to_string();

        // Log based on severity, always including internal details
        match &self {
            Self::Validation(_) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Validation error"
                );
            }
            Self::Unauthorized | Self::InvalidToken => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Authentication error"
                );
            }
            Self::Forbidden(_)
            | Self::PackageNotFound(_)
            | Self::RouteNotFound
            | Self::MethodNotAllowed => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Client error"
                );
            }
            Self::Internal(_) | Self::Core(_) => {
                tracing::error!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Server error (internal details logged)"
                );
            }
        }

        (status, Json(self.body())).into_response()
    }
}
