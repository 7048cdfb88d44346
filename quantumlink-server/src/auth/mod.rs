//! Bearer authentication module
//!
//! Provides the `auth_gate` middleware and the `CurrentUser` extractor.
//!
//! The credential is read from the `Authorization` header (optionally with a
//! `Bearer ` prefix). When the header is missing or blank and the request body
//! is JSON, an `auth_token` string field in the body is used instead. The
//! token is resolved through the configured [`Authenticator`] and the
//! resulting user is stored in the request extensions.
//!
//! [`Authenticator`]: quantumlink_core::Authenticator

mod jwt;

pub use jwt::{JwtAuthenticator, TokenClaims};

use axum::{
    body::{to_bytes, Body},
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use quantumlink_core::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Body field consulted when no `Authorization` header is sent
const BODY_TOKEN_FIELD: &str = "auth_token";

/// User resolved by `auth_gate` for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Authentication middleware for protected routes.
///
/// Rejects with `UNAUTHORIZED` when no credential is found and with
/// `INVALID_TOKEN` when the authenticator does not recognise it. Runs before
/// any body validation or store access.
pub async fn auth_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (token, mut request) = extract_token(request, state.body_limit).await?;
    let token = token.ok_or(ApiError::Unauthorized)?;

    let user = state
        .authenticator
        .resolve(&token)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    tracing::debug!(user_id = %user.id, tier = ?user.tier, "Request authenticated");

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Find the credential, returning the request intact for the handler.
async fn extract_token(
    request: Request,
    body_limit: usize,
) -> Result<(Option<String>, Request), ApiError> {
    if let Some(token) = header_token(request.headers())? {
        return Ok((Some(token), request));
    }

    if !is_json_request(request.headers()) {
        return Ok((None, request));
    }

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, body_limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Could not buffer body while looking for auth_token");
            return Err(ApiError::Unauthorized);
        }
    };

    let token = body_token(&bytes);
    Ok((token, Request::from_parts(parts, Body::from(bytes))))
}

/// Token from the `Authorization` header. A blank header counts as absent.
fn header_token(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let raw = value.to_str().map_err(|_| ApiError::InvalidToken)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(strip_bearer(raw).to_string()))
}

/// Token from the `auth_token` field of a JSON object body.
fn body_token(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    let token = value.get(BODY_TOKEN_FIELD)?.as_str()?.trim();
    if token.is_empty() {
        None
    } else {
        Some(strip_bearer(token).to_string())
    }
}

fn strip_bearer(raw: &str) -> &str {
    raw.strip_prefix("Bearer ").unwrap_or(raw).trim()
}

/// `application/json` or any `application/*+json` media type
fn is_json_request(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_strip_bearer() {
        assert_eq!(strip_bearer("Bearer valid_1"), "valid_1");
        assert_eq!(strip_bearer("valid_1"), "valid_1");
        assert_eq!(strip_bearer("Basic abc"), "Basic abc");
    }

    #[test]
    fn test_header_token() {
        let map = headers(&[(header::AUTHORIZATION, "Bearer valid_42")]);
        assert_eq!(header_token(&map).unwrap().as_deref(), Some("valid_42"));

        let map = headers(&[(header::AUTHORIZATION, "valid_42")]);
        assert_eq!(header_token(&map).unwrap().as_deref(), Some("valid_42"));

        let map = headers(&[(header::AUTHORIZATION, "   ")]);
        assert!(header_token(&map).unwrap().is_none());

        assert!(header_token(&HeaderMap::new()).unwrap().is_none());
    }

    #[test]
    fn test_header_token_rejects_opaque_bytes() {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );
        assert!(matches!(header_token(&map), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_body_token() {
        assert_eq!(
            body_token(br#"{"auth_token": "valid_9", "message": "hi"}"#).as_deref(),
            Some("valid_9")
        );
        assert_eq!(
            body_token(br#"{"auth_token": "Bearer valid_9"}"#).as_deref(),
            Some("valid_9")
        );
        assert!(body_token(br#"{"auth_token": 12}"#).is_none());
        assert!(body_token(br#"{"auth_token": ""}"#).is_none());
        assert!(body_token(br#"["auth_token"]"#).is_none());
        assert!(body_token(b"not json").is_none());
    }

    #[test]
    fn test_is_json_request() {
        assert!(is_json_request(&headers(&[(
            header::CONTENT_TYPE,
            "application/json"
        )])));
        assert!(is_json_request(&headers(&[(
            header::CONTENT_TYPE,
            "Application/JSON; charset=utf-8"
        )])));
        assert!(is_json_request(&headers(&[(
            header::CONTENT_TYPE,
            "application/merge-patch+json"
        )])));
        assert!(!is_json_request(&headers(&[(header::CONTENT_TYPE, "text/plain")])));
        assert!(!is_json_request(&HeaderMap::new()));
    }

    #[tokio::test]
    async fn test_extract_token_prefers_header_and_keeps_body() {
        let request = axum::http::Request::builder()
            .header(header::AUTHORIZATION, "Bearer valid_header")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"auth_token": "valid_body"}"#))
            .unwrap();

        let (token, request) = extract_token(request, 1024).await.unwrap();
        assert_eq!(token.as_deref(), Some("valid_header"));

        let body = to_bytes(request.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"auth_token": "valid_body"}"#);
    }

    #[tokio::test]
    async fn test_extract_token_falls_back_to_body() {
        let request = axum::http::Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"auth_token": "valid_body", "message": "x"}"#))
            .unwrap();

        let (token, request) = extract_token(request, 1024).await.unwrap();
        assert_eq!(token.as_deref(), Some("valid_body"));

        // Body is replayed for the handler
        let body = to_bytes(request.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"auth_token": "valid_body", "message": "x"}"#);
    }

    #[tokio::test]
    async fn test_extract_token_ignores_non_json_body() {
        let request = axum::http::Request::builder()
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"auth_token": "valid_body"}"#))
            .unwrap();

        let (token, _) = extract_token(request, 1024).await.unwrap();
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_extract_token_oversized_body_is_unauthorized() {
        let request = axum::http::Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(vec![b' '; 64]))
            .unwrap();

        let err = extract_token(request, 16).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
