//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use quantumlink_core::{
    Authenticator, InMemoryStore, MockEncoder, PackageStore, PrefixTokenAuthenticator,
    QuantumEncoder,
};

use crate::auth::JwtAuthenticator;
use crate::config::Config;

/// Application state containing the collaborators.
///
/// Built once at startup and dropped after shutdown; handlers only see it
/// through `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Encodes and decodes message payloads
    pub encoder: Arc<dyn QuantumEncoder>,
    /// Package and metrics persistence
    pub store: Arc<dyn PackageStore>,
    /// Resolves bearer credentials to users
    pub authenticator: Arc<dyn Authenticator>,
    /// Maximum bytes buffered when looking for an in-body token
    pub body_limit: usize,
}

impl AppState {
    pub fn new(
        encoder: Arc<dyn QuantumEncoder>,
        store: Arc<dyn PackageStore>,
        authenticator: Arc<dyn Authenticator>,
        body_limit: usize,
    ) -> Self {
        Self {
            encoder,
            store,
            authenticator,
            body_limit,
        }
    }

    /// Mock encoder, in-memory store and the selected authenticator
    pub fn from_config(config: &Config) -> Self {
        let authenticator: Arc<dyn Authenticator> = match &config.jwt_secret {
            Some(secret) => {
                tracing::info!("Auth: HS256 bearer tokens");
                Arc::new(JwtAuthenticator::new(secret))
            }
            None => {
                tracing::warn!("Auth: accepting development 'valid_<id>' tokens (JWT_SECRET not set)");
                Arc::new(PrefixTokenAuthenticator::new())
            }
        };

        tracing::warn!("Storage: in-memory store - packages are lost on restart");

        Self::new(
            Arc::new(MockEncoder::default()),
            Arc::new(InMemoryStore::new()),
            authenticator,
            config.body_limit_bytes(),
        )
    }
}
