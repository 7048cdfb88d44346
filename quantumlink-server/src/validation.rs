//! Request validation module
//!
//! Provides the `JsonObject` body extractor and the field rules for the
//! encode and decode endpoints. Every failure is an `ApiError::Validation`.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use quantumlink_core::{Measurement, PackageOptions};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Maximum message length in characters, measured after trimming
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// A request body that parsed as a JSON object.
///
/// Missing or empty bodies, bodies over the configured `DefaultBodyLimit`,
/// malformed JSON and non-object JSON are rejected with a validation error.
/// The `Content-Type` header is not inspected.
#[derive(Debug, Clone)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(format!("Failed to read request body: {}", e)))?;

        parse_json_object(&bytes).map(JsonObject)
    }
}

/// Path parameters whose rejection is reported as a validation error,
/// e.g. a segment that does not percent-decode to UTF-8.
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| PathParam(value))
            .map_err(|rejection| ApiError::validation(rejection.body_text()))
    }
}

/// Parse raw body bytes into a JSON object
pub fn parse_json_object(bytes: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::validation("A valid JSON body is required"));
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) if map.is_empty() => {
            Err(ApiError::validation("A valid JSON body is required"))
        }
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::validation("The JSON body must be an object")),
        Err(e) => Err(ApiError::validation(format!("Malformed JSON body: {}", e))),
    }
}

/// Validated input of `POST /api/v1/encode`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeInput {
    /// Trimmed message
    pub message: String,
    pub options: PackageOptions,
}

/// Validate an encode request body.
///
/// Rules, in order: `message` is a string, non-empty after trimming, at most
/// [`MAX_MESSAGE_CHARS`] characters after trimming; `options` is absent, null
/// or an object whose `encoding_type` and `priority` are absent, null or
/// strings.
pub fn validate_encode_request(body: &Map<String, Value>) -> Result<EncodeInput, ApiError> {
    let message = match body.get("message") {
        Some(Value::String(s)) => s.trim(),
        _ => {
            return Err(ApiError::validation(
                "The 'message' field must be a non-empty string",
            ))
        }
    };

    if message.is_empty() {
        return Err(ApiError::validation(
            "The 'message' field must be a non-empty string",
        ));
    }

    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::validation(format!(
            "The message must not exceed {} characters",
            MAX_MESSAGE_CHARS
        )));
    }

    let mut options = PackageOptions::default();
    match body.get("options") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            if let Some(encoding_type) = optional_string(map, "encoding_type")? {
                options.encoding_type = encoding_type;
            }
            if let Some(priority) = optional_string(map, "priority")? {
                options.priority = priority;
            }
        }
        Some(_) => {
            return Err(ApiError::validation(
                "The 'options' field must be an object",
            ))
        }
    }

    Ok(EncodeInput {
        message: message.to_string(),
        options,
    })
}

fn optional_string(map: &Map<String, Value>, field: &str) -> Result<Option<String>, ApiError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApiError::validation(format!(
            "The 'options.{}' field must be a string",
            field
        ))),
    }
}

/// Validated input of `POST /api/v1/decode`
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeInput {
    pub package_id: String,
    pub measurements: Vec<Measurement>,
}

/// Validate a decode request body: `package_id` is a non-empty string and
/// `measurements` is a non-empty array.
pub fn validate_decode_request(body: &Map<String, Value>) -> Result<DecodeInput, ApiError> {
    let package_id = match body.get("package_id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(ApiError::validation("The 'package_id' field is required")),
    };

    let measurements = match body.get("measurements") {
        Some(Value::Array(items)) if !items.is_empty() => items.clone(),
        _ => {
            return Err(ApiError::validation(
                "The 'measurements' field must be a non-empty list",
            ))
        }
    };

    Ok(DecodeInput {
        package_id,
        measurements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn detail(err: ApiError) -> String {
        match err {
            ApiError::Validation(detail) => detail,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_json_object() {
        assert!(parse_json_object(br#"{"a": 1}"#).is_ok());
        assert_eq!(
            detail(parse_json_object(b"{}").unwrap_err()),
            "A valid JSON body is required"
        );

        assert_eq!(
            detail(parse_json_object(b"").unwrap_err()),
            "A valid JSON body is required"
        );
        assert_eq!(
            detail(parse_json_object(b"  \n").unwrap_err()),
            "A valid JSON body is required"
        );
        assert_eq!(
            detail(parse_json_object(b"[1, 2]").unwrap_err()),
            "The JSON body must be an object"
        );
        assert!(detail(parse_json_object(b"{oops").unwrap_err()).starts_with("Malformed JSON body"));
    }

    #[test]
    fn test_encode_trims_and_defaults() {
        let input = validate_encode_request(&object(json!({"message": "  hello  "}))).unwrap();
        assert_eq!(input.message, "hello");
        assert_eq!(input.options, PackageOptions::default());
    }

    #[test]
    fn test_encode_reads_options() {
        let input = validate_encode_request(&object(json!({
            "message": "hi",
            "options": {"encoding_type": "BB84", "priority": "high"}
        })))
        .unwrap();
        assert_eq!(input.options.encoding_type, "BB84");
        assert_eq!(input.options.priority, "high");

        let input = validate_encode_request(&object(json!({
            "message": "hi",
            "options": {"priority": null}
        })))
        .unwrap();
        assert_eq!(input.options, PackageOptions::default());
    }

    #[test]
    fn test_encode_rejects_bad_message() {
        for body in [
            json!({}),
            json!({"message": ""}),
            json!({"message": " \t\n "}),
            json!({"message": 42}),
            json!({"message": null}),
        ] {
            let err = validate_encode_request(&object(body)).unwrap_err();
            assert_eq!(detail(err), "The 'message' field must be a non-empty string");
        }
    }

    #[test]
    fn test_encode_length_limit_applies_after_trim() {
        let exact = "q".repeat(MAX_MESSAGE_CHARS);
        let padded = format!("   {}   ", exact);
        assert!(validate_encode_request(&object(json!({"message": padded}))).is_ok());

        let too_long = "q".repeat(MAX_MESSAGE_CHARS + 1);
        let err = validate_encode_request(&object(json!({"message": too_long}))).unwrap_err();
        assert_eq!(detail(err), "The message must not exceed 1000 characters");

        // Characters, not bytes
        let wide = "⚛".repeat(MAX_MESSAGE_CHARS);
        assert!(validate_encode_request(&object(json!({"message": wide}))).is_ok());
    }

    #[test]
    fn test_encode_rejects_bad_options() {
        let err =
            validate_encode_request(&object(json!({"message": "hi", "options": "fast"})))
                .unwrap_err();
        assert_eq!(detail(err), "The 'options' field must be an object");

        let err = validate_encode_request(&object(json!({
            "message": "hi",
            "options": {"encoding_type": 7}
        })))
        .unwrap_err();
        assert_eq!(detail(err), "The 'options.encoding_type' field must be a string");
    }

    #[test]
    fn test_decode_accepts_valid_request() {
        let input = validate_decode_request(&object(json!({
            "package_id": "BiMO-1",
            "measurements": [{"energy": 5.5}, {"energy": 2.9}]
        })))
        .unwrap();
        assert_eq!(input.package_id, "BiMO-1");
        assert_eq!(input.measurements.len(), 2);
    }

    #[test]
    fn test_decode_validation_order() {
        // package_id is checked before measurements
        let err = validate_decode_request(&object(json!({"measurements": []}))).unwrap_err();
        assert_eq!(detail(err), "The 'package_id' field is required");

        let err = validate_decode_request(&object(json!({"package_id": ""}))).unwrap_err();
        assert_eq!(detail(err), "The 'package_id' field is required");

        for measurements in [json!(null), json!([]), json!({"energy": 1}), json!("x")] {
            let err = validate_decode_request(&object(json!({
                "package_id": "BiMO-1",
                "measurements": measurements
            })))
            .unwrap_err();
            assert_eq!(detail(err), "The 'measurements' field must be a non-empty list");
        }
    }
}
