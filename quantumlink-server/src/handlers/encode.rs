//! Message encoding handler
//!
//! Handles POST /api/v1/encode requests to turn a text message into a stored
//! quantum package.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use quantumlink_core::Package;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ErrorBody};
use crate::handlers::{ApiResponse, AppState};
use crate::validation::{validate_encode_request, JsonObject};

/// Request body for message encoding.
///
/// Schema only: bodies are parsed by `JsonObject` and checked by
/// `validate_encode_request`.
#[derive(Debug, ToSchema)]
pub struct EncodeRequest {
    /// Message to encode (1-1000 characters after trimming)
    #[schema(example = "hello")]
    pub message: String,
    pub options: Option<EncodeOptionsRequest>,
}

/// Optional encoding parameters (schema only)
#[derive(Debug, ToSchema)]
pub struct EncodeOptionsRequest {
    /// Encoding scheme (default: "BiMO")
    #[schema(example = "BiMO")]
    pub encoding_type: Option<String>,
    /// Delivery priority (default: "medium")
    #[schema(example = "high")]
    pub priority: Option<String>,
}

/// `data` of a successful encode response
#[derive(Debug, Serialize, ToSchema)]
pub struct EncodeResponse {
    /// Identifier of the new package
    #[schema(example = "BiMO-6f1c2d4e8a9b4c3d9e0f1a2b3c4d5e6f")]
    pub package_id: String,
    /// Encoder timestamp
    #[schema(value_type = String, example = "2026-01-08T10:00:00Z")]
    pub timestamp: DateTime<Utc>,
    /// Number of qubits used
    #[schema(example = 5)]
    pub qubits_count: u32,
    #[schema(example = "BiMO")]
    pub encoding_type: String,
}

/// Encode a message into a quantum package
///
/// Each call creates a new package owned by the caller, even for identical
/// messages.
#[utoipa::path(
    post,
    path = "/api/v1/encode",
    tag = "Messages",
    request_body = EncodeRequest,
    responses(
        (status = 201, description = "Message encoded; body is the success envelope with this `data`", body = EncodeResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn encode_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<ApiResponse<EncodeResponse>>), ApiError> {
    let input = validate_encode_request(&body)?;

    tracing::info!(
        user_id = %user.id,
        chars = input.message.chars().count(),
        encoding_type = %input.options.encoding_type,
        "Encoding message"
    );

    let draft = state.encoder.encode(&input.message).await?;
    let package = Package::from_draft(draft, &user.id, input.options, Utc::now());

    let response = EncodeResponse {
        package_id: package.id.clone(),
        timestamp: package.timestamp,
        qubits_count: package.qubits_count,
        encoding_type: package.encoding_type.clone(),
    };

    state.store.save(&user.id, package).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success(response, "Message encoded successfully"),
    ))
}
