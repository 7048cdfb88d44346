//! Router-level fallbacks for unmatched paths and verbs.

use crate::error::ApiError;

/// Any path without a route
pub async fn not_found_handler() -> ApiError {
    ApiError::RouteNotFound
}

/// Known path, unsupported verb
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
