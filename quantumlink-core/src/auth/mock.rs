//! Development authenticator accepting `valid_<user id>` tokens.

use async_trait::async_trait;

use super::Authenticator;
use crate::error::Result;
use crate::user::{Tier, User};

const TOKEN_PREFIX: &str = "valid_";

/// Accepts any token of the form `valid_<user id>`.
/// WARNING: performs no verification - do not use in production!
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixTokenAuthenticator;

impl PrefixTokenAuthenticator {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a token synchronously.
    pub fn resolve_sync(&self, token: &str) -> Option<User> {
        let id = token.strip_prefix(TOKEN_PREFIX)?;
        if id.is_empty() {
            return None;
        }

        let chars: Vec<char> = token.chars().collect();
        let suffix: String = chars[chars.len().saturating_sub(4)..].iter().collect();

        Some(User {
            id: id.to_string(),
            username: format!("user_{}", suffix),
            tier: Tier::Premium,
        })
    }
}

#[async_trait]
impl Authenticator for PrefixTokenAuthenticator {
    async fn resolve(&self, token: &str) -> Result<Option<User>> {
        Ok(self.resolve_sync(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token_resolves_user() {
        let user = PrefixTokenAuthenticator::new()
            .resolve_sync("valid_12345")
            .unwrap();
        assert_eq!(user.id, "12345");
        assert_eq!(user.username, "user_2345");
        assert_eq!(user.tier, Tier::Premium);
    }

    #[test]
    fn test_rejected_tokens() {
        let auth = PrefixTokenAuthenticator::new();
        assert!(auth.resolve_sync("").is_none());
        assert!(auth.resolve_sync("valid_").is_none());
        assert!(auth.resolve_sync("invalid_123").is_none());
        assert!(auth.resolve_sync("VALID_123").is_none());
    }

    #[tokio::test]
    async fn test_async_resolve() {
        let auth = PrefixTokenAuthenticator::new();
        let user = auth.resolve("valid_7").await.unwrap().unwrap();
        assert_eq!(user.id, "7");
        assert_eq!(user.username, "user_id_7");
        assert!(auth.resolve("nope").await.unwrap().is_none());
    }
}
