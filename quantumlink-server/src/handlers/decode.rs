//! Package decoding handler
//!
//! Handles POST /api/v1/decode requests: decodes a stored package with the
//! caller's measurements and records the resulting metrics.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use quantumlink_core::TransmissionStatus;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ErrorBody};
use crate::handlers::{find_owned_package, ApiResponse, AppState, MetricsRecord};
use crate::validation::{validate_decode_request, JsonObject};

/// Request body for package decoding.
///
/// Schema only: bodies are parsed by `JsonObject` and checked by
/// `validate_decode_request`.
#[derive(Debug, ToSchema)]
pub struct DecodeRequest {
    /// Identifier returned by the encode endpoint
    #[schema(example = "BiMO-6f1c2d4e8a9b4c3d9e0f1a2b3c4d5e6f")]
    pub package_id: String,
    /// Non-empty list of measurement records (opaque to the API)
    #[schema(value_type = Vec<Object>)]
    pub measurements: Vec<serde_json::Value>,
}

/// `data` of a successful decode response
#[derive(Debug, Serialize, ToSchema)]
pub struct DecodeResponse {
    pub package_id: String,
    /// Recovered text
    #[schema(example = "hello")]
    pub decoded_message: String,
    /// Encoder-reported outcome
    #[schema(value_type = String, example = "SUCCESS")]
    pub transmission_status: TransmissionStatus,
    pub metrics: MetricsRecord,
    #[schema(value_type = String, example = "2026-01-08T10:00:00Z")]
    pub decoded_at: DateTime<Utc>,
}

/// Decode a stored package
///
/// Only the package owner may decode it. A successful decode replaces any
/// metrics previously recorded for the package.
#[utoipa::path(
    post,
    path = "/api/v1/decode",
    tag = "Messages",
    request_body = DecodeRequest,
    responses(
        (status = 200, description = "Package decoded; body is the success envelope with this `data`", body = DecodeResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Package owned by another user", body = ErrorBody),
        (status = 404, description = "Package not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn decode_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonObject(body): JsonObject,
) -> Result<Json<ApiResponse<DecodeResponse>>, ApiError> {
    let input = validate_decode_request(&body)?;

    tracing::info!(
        package_id = %input.package_id,
        user_id = %user.id,
        measurements = input.measurements.len(),
        "Decoding package"
    );

    let package = find_owned_package(&state, &user, &input.package_id).await?;
    let outcome = state.encoder.decode(&package, &input.measurements).await?;

    state
        .store
        .update_metrics(&package.id, outcome.metrics)
        .await?;

    Ok(ApiResponse::success(
        DecodeResponse {
            package_id: package.id,
            decoded_message: outcome.text,
            transmission_status: outcome.status,
            metrics: outcome.metrics.into(),
            decoded_at: Utc::now(),
        },
        "Message decoded successfully",
    ))
}
