//! Package and metrics records.
//!
//! A [`Package`] is one encoded message plus its ownership metadata. It is
//! immutable once stored; the only thing that changes afterwards is the
//! [`Metrics`] record attached to it by a decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Encoding scheme recorded when the caller does not choose one.
pub const DEFAULT_ENCODING_TYPE: &str = "BiMO";

/// Priority recorded when the caller does not choose one.
pub const DEFAULT_PRIORITY: &str = "medium";

/// A single caller-supplied measurement. Opaque to this crate; only the
/// encoder interprets it.
pub type Measurement = serde_json::Value;

/// Encoder output before ownership and request metadata are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDraft {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub quantum_data: String,
    pub qubits_count: u32,
}

/// Caller-chosen encoding options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOptions {
    pub encoding_type: String,
    pub priority: String,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            encoding_type: DEFAULT_ENCODING_TYPE.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }
}

/// A stored, owned package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub owner_id: String,
    /// When the encoder produced the payload
    pub timestamp: DateTime<Utc>,
    /// When the package was accepted for storage
    pub created_at: DateTime<Utc>,
    pub encoding_type: String,
    pub priority: String,
    pub qubits_count: u32,
    pub quantum_data: String,
}

impl Package {
    /// Attach owner and options to an encoder draft.
    pub fn from_draft(
        draft: PackageDraft,
        owner_id: impl Into<String>,
        options: PackageOptions,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: draft.id,
            owner_id: owner_id.into(),
            timestamp: draft.timestamp,
            created_at,
            encoding_type: options.encoding_type,
            priority: options.priority,
            qubits_count: draft.qubits_count,
            quantum_data: draft.quantum_data,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// Decode-time quality measurements. Latest decode wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub fidelity: f64,
    pub error_rate: f64,
    pub coherence: f64,
}

/// Outcome reported by the encoder for a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransmissionStatus {
    Success,
    Partial,
    Failed,
}

impl std::fmt::Display for TransmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Partial => write!(f, "PARTIAL"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOutcome {
    pub text: String,
    pub status: TransmissionStatus,
    pub metrics: Metrics,
}
