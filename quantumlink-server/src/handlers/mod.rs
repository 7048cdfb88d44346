//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.
//! Successful responses share the envelope `{status: "success", message, data}`.

pub mod decode;
pub mod encode;
pub mod fallback;
pub mod health;
pub mod packages;

use axum::Json;
use quantumlink_core::{Package, User};
use serde::Serialize;

use crate::error::ApiError;
pub use crate::state::AppState;

pub use decode::{decode_handler, DecodeRequest, DecodeResponse};
pub use encode::{encode_handler, EncodeOptionsRequest, EncodeRequest, EncodeResponse};
pub use fallback::{method_not_allowed_handler, not_found_handler};
pub use health::{health, ready, HealthResponse, ReadyResponse};
pub use packages::{
    get_package_handler, list_packages_handler, MetricsRecord, PackageDetailResponse,
    PackageListResponse, PackageRecord, PackageStatus, PackageSummary,
};

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always "success"
    pub status: &'static str,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "success",
            message: message.into(),
            data,
        })
    }
}

/// Load a package the caller owns.
///
/// Missing packages are `PACKAGE_NOT_FOUND` whoever asks; packages owned by
/// someone else are `FORBIDDEN`.
pub(crate) async fn find_owned_package(
    state: &AppState,
    user: &User,
    package_id: &str,
) -> Result<Package, ApiError> {
    let package = state
        .store
        .find_by_id(package_id)
        .await?
        .ok_or_else(|| ApiError::PackageNotFound(package_id.to_string()))?;

    if !package.is_owned_by(&user.id) {
        tracing::warn!(
            package_id = %package_id,
            user_id = %user.id,
            "Package access by non-owner"
        );
        return Err(ApiError::Forbidden(package_id.to_string()));
    }

    Ok(package)
}
