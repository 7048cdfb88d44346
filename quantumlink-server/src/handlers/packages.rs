//! User packages handlers
//!
//! Handles listing and retrieving packages for authenticated users.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use quantumlink_core::{Metrics, Package};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ErrorBody};
use crate::handlers::{find_owned_package, ApiResponse, AppState};
use crate::validation::PathParam;

/// Decode metrics of a package
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct MetricsRecord {
    #[schema(example = 0.95)]
    pub fidelity: f64,
    #[schema(example = 0.05)]
    pub error_rate: f64,
    #[schema(example = 0.92)]
    pub coherence: f64,
}

impl From<Metrics> for MetricsRecord {
    fn from(metrics: Metrics) -> Self {
        Self {
            fidelity: metrics.fidelity,
            error_rate: metrics.error_rate,
            coherence: metrics.coherence,
        }
    }
}

/// Whether a package has been decoded at least once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    Encoded,
    Decoded,
}

/// Package entry of the list endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PackageSummary {
    pub package_id: String,
    #[schema(value_type = String, example = "2026-01-08T10:00:00Z")]
    pub timestamp: DateTime<Utc>,
    #[schema(example = "BiMO")]
    pub encoding_type: String,
    #[schema(example = 5)]
    pub qubits_count: u32,
    pub status: PackageStatus,
    /// Present only once the package has been decoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsRecord>,
}

impl PackageSummary {
    fn new(package: Package, metrics: Option<Metrics>) -> Self {
        Self {
            package_id: package.id,
            timestamp: package.timestamp,
            encoding_type: package.encoding_type,
            qubits_count: package.qubits_count,
            status: if metrics.is_some() {
                PackageStatus::Decoded
            } else {
                PackageStatus::Encoded
            },
            metrics: metrics.map(MetricsRecord::from),
        }
    }
}

/// `data` of the list endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PackageListResponse {
    pub packages: Vec<PackageSummary>,
    pub total_count: usize,
}

/// Full package record
#[derive(Debug, Serialize, ToSchema)]
pub struct PackageRecord {
    pub package_id: String,
    /// Owner of the package
    pub user_id: String,
    /// Encoder timestamp
    #[schema(value_type = String, example = "2026-01-08T10:00:00Z")]
    pub timestamp: DateTime<Utc>,
    /// When the package was stored
    #[schema(value_type = String, example = "2026-01-08T10:00:00Z")]
    pub created_at: DateTime<Utc>,
    pub encoding_type: String,
    #[schema(example = "medium")]
    pub priority: String,
    pub qubits_count: u32,
    /// Opaque encoder payload
    pub quantum_data: String,
}

impl From<Package> for PackageRecord {
    fn from(package: Package) -> Self {
        Self {
            package_id: package.id,
            user_id: package.owner_id,
            timestamp: package.timestamp,
            created_at: package.created_at,
            encoding_type: package.encoding_type,
            priority: package.priority,
            qubits_count: package.qubits_count,
            quantum_data: package.quantum_data,
        }
    }
}

/// `data` of the detail endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PackageDetailResponse {
    pub package: PackageRecord,
    /// `null` until the package is decoded
    pub metrics: Option<MetricsRecord>,
}

/// List packages for authenticated user
///
/// Returns every package owned by the caller with its decode status.
#[utoipa::path(
    get,
    path = "/api/v1/packages",
    tag = "Packages",
    responses(
        (status = 200, description = "Caller's packages; body is the success envelope with this `data`", body = PackageListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn list_packages_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<PackageListResponse>>, ApiError> {
    let packages = state.store.list_by_owner(&user.id).await?;

    let mut summaries = Vec::with_capacity(packages.len());
    for package in packages {
        let metrics = state.store.find_metrics(&package.id).await?;
        summaries.push(PackageSummary::new(package, metrics));
    }

    let total_count = summaries.len();
    tracing::debug!(user_id = %user.id, total_count, "Listed packages");

    Ok(ApiResponse::success(
        PackageListResponse {
            packages: summaries,
            total_count,
        },
        format!("Found {} packages", total_count),
    ))
}

/// Get package detail for authenticated user
///
/// Returns the full package and its metrics. Only the owner may read it.
#[utoipa::path(
    get,
    path = "/api/v1/packages/{package_id}",
    tag = "Packages",
    params(
        ("package_id" = String, Path, description = "Package ID")
    ),
    responses(
        (status = 200, description = "Package details; body is the success envelope with this `data`", body = PackageDetailResponse),
        (status = 400, description = "Malformed package id", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Package owned by another user", body = ErrorBody),
        (status = 404, description = "Package not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn get_package_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(package_id): PathParam<String>,
) -> Result<Json<ApiResponse<PackageDetailResponse>>, ApiError> {
    let package = find_owned_package(&state, &user, &package_id).await?;
    let metrics = state.store.find_metrics(&package.id).await?;

    Ok(ApiResponse::success(
        PackageDetailResponse {
            package: package.into(),
            metrics: metrics.map(MetricsRecord::from),
        },
        "Package retrieved successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> Package {
        Package {
            id: "BiMO-1".to_string(),
            owner_id: "7".to_string(),
            timestamp: Utc::now(),
            created_at: Utc::now(),
            encoding_type: "BiMO".to_string(),
            priority: "low".to_string(),
            qubits_count: 4,
            quantum_data: "ZGF0YQ==".to_string(),
        }
    }

    #[test]
    fn test_summary_without_metrics_is_encoded() {
        let summary = PackageSummary::new(package(), None);
        assert_eq!(summary.status, PackageStatus::Encoded);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "encoded");
        assert!(json.get("metrics").is_none());
    }

    #[test]
    fn test_summary_with_metrics_is_decoded() {
        let metrics = Metrics {
            fidelity: 0.95,
            error_rate: 0.05,
            coherence: 0.92,
        };
        let json = serde_json::to_value(PackageSummary::new(package(), Some(metrics))).unwrap();
        assert_eq!(json["status"], "decoded");
        assert_eq!(json["metrics"]["fidelity"], 0.95);
    }

    #[test]
    fn test_record_exposes_owner_as_user_id() {
        let json = serde_json::to_value(PackageRecord::from(package())).unwrap();
        assert_eq!(json["package_id"], "BiMO-1");
        assert_eq!(json["user_id"], "7");
        assert_eq!(json["priority"], "low");
    }
}
