//! QuantumLink Core - domain model for quantum message packages
//!
//! This crate defines what the QuantumLink API stores and the collaborators it
//! depends on. The HTTP layer lives in `quantumlink-server`.
//!
//! # Collaborators
//!
//! - [`QuantumEncoder`] - encodes text into a package payload and decodes it
//!   back using caller measurements
//! - [`PackageStore`] - persists packages and their decode metrics
//! - [`Authenticator`] - resolves a bearer credential to a [`User`]
//!
//! Each trait has a development implementation ([`MockEncoder`],
//! [`InMemoryStore`], [`PrefixTokenAuthenticator`]) so the service runs
//! without external systems.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use quantumlink_core::{
//!     InMemoryStore, MockEncoder, Package, PackageOptions, PackageStore, QuantumEncoder,
//! };
//!
//! # async fn example() -> quantumlink_core::Result<()> {
//! let encoder = MockEncoder::default();
//! let store = InMemoryStore::new();
//!
//! let draft = encoder.encode("hello").await?;
//! let package = Package::from_draft(draft, "42", PackageOptions::default(), Utc::now());
//! store.save("42", package).await?;
//!
//! assert_eq!(store.list_by_owner("42").await?.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod encoder;
pub mod error;
pub mod package;
pub mod store;
pub mod user;

pub use auth::{Authenticator, PrefixTokenAuthenticator};
pub use encoder::{MockEncoder, QuantumEncoder};
pub use error::{CoreError, Result};
pub use package::{
    DecodeOutcome, Measurement, Metrics, Package, PackageDraft, PackageOptions,
    TransmissionStatus, DEFAULT_ENCODING_TYPE, DEFAULT_PRIORITY,
};
pub use store::{InMemoryStore, PackageStore};
pub use user::{Tier, User};
