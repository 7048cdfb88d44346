//! Quantum message encoders.
//!
//! The encoder turns plain text into an opaque quantum payload and, given
//! the caller's measurements, turns that payload back into text with quality
//! metrics. Real encoders talk to quantum hardware or a simulator; this crate
//! ships only [`MockEncoder`].

mod mock;

pub use mock::MockEncoder;

use async_trait::async_trait;

use crate::error::Result;
use crate::package::{DecodeOutcome, Measurement, Package, PackageDraft};

/// Encoder collaborator.
///
/// Implementations must be thread-safe (`Send + Sync`) and must issue a
/// fresh identifier on every `encode` call, even for identical input.
/// The qubit count must be deterministic for identical input.
#[async_trait]
pub trait QuantumEncoder: Send + Sync {
    /// Encode an already-validated, trimmed message.
    async fn encode(&self, message: &str) -> Result<PackageDraft>;

    /// Decode a stored package using the caller's measurements.
    async fn decode(&self, package: &Package, measurements: &[Measurement])
        -> Result<DecodeOutcome>;
}
