//! Credential resolution.

mod mock;

pub use mock::PrefixTokenAuthenticator;

use async_trait::async_trait;

use crate::error::Result;
use crate::user::User;

/// Authenticator collaborator.
///
/// `Ok(None)` means the credential was understood but does not identify a
/// user; `Err` is reserved for backend failures.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Option<User>>;
}
