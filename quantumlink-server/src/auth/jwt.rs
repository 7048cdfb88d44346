//! HS256 JWT authenticator
//!
//! Verifies bearer tokens signed with the shared `JWT_SECRET`. The `sub`
//! claim becomes the user id; `name` and `tier` are optional.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use quantumlink_core::{Authenticator, Tier, User};
use serde::{Deserialize, Serialize};

/// Claims carried by QuantumLink bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Subscription tier
    #[serde(default)]
    pub tier: Tier,
    /// Expiration time (validated by jsonwebtoken)
    pub exp: u64,
}

/// Authenticator validating HS256-signed JWTs.
pub struct JwtAuthenticator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate a token and extract its claims.
    pub fn validate(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        decode::<TokenClaims>(token, &self.key, &self.validation).map(|data| data.claims)
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn resolve(&self, token: &str) -> quantumlink_core::Result<Option<User>> {
        let claims = match self.validate(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token rejected");
                return Ok(None);
            }
        };

        if claims.sub.is_empty() {
            return Ok(None);
        }

        let username = claims
            .name
            .unwrap_or_else(|| format!("user_{}", claims.sub));

        Ok(Some(User {
            id: claims.sub,
            username,
            tier: claims.tier,
        }))
    }
}

impl std::fmt::Debug for JwtAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthenticator")
            .field("algorithm", &"HS256")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-secret";

    fn now_epoch() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn create_test_token(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(sub: &str, exp: u64) -> TokenClaims {
        TokenClaims {
            sub: sub.to_string(),
            name: Some("Ada".to_string()),
            tier: Tier::Premium,
            exp,
        }
    }

    #[tokio::test]
    async fn test_valid_token_resolves_user() {
        let auth = JwtAuthenticator::new(SECRET);
        let token = create_test_token(&claims("user-1", now_epoch() + 3600), SECRET);

        let user = auth.resolve(&token).await.unwrap().unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.username, "Ada");
        assert_eq!(user.tier, Tier::Premium);
    }

    #[tokio::test]
    async fn test_missing_name_and_tier_use_defaults() {
        let auth = JwtAuthenticator::new(SECRET);
        let token = create_test_token(
            &TokenClaims {
                sub: "7".to_string(),
                name: None,
                tier: Tier::default(),
                exp: now_epoch() + 3600,
            },
            SECRET,
        );

        let user = auth.resolve(&token).await.unwrap().unwrap();
        assert_eq!(user.username, "user_7");
        assert_eq!(user.tier, Tier::Free);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let auth = JwtAuthenticator::new(SECRET);
        let token = create_test_token(&claims("user-1", now_epoch() - 3600), SECRET);

        assert!(auth.resolve(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected() {
        let auth = JwtAuthenticator::new(SECRET);
        let token = create_test_token(&claims("user-1", now_epoch() + 3600), "other");

        assert!(auth.resolve(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let auth = JwtAuthenticator::new(SECRET);
        assert!(auth.resolve("not-a-valid-jwt").await.unwrap().is_none());
        assert!(auth.resolve("valid_123").await.unwrap().is_none());
    }
}
