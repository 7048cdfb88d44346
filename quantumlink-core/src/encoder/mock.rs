//! Mock encoder implementation for testing.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use uuid::Uuid;

use super::QuantumEncoder;
use crate::error::{CoreError, Result};
use crate::package::{
    DecodeOutcome, Measurement, Metrics, Package, PackageDraft, TransmissionStatus,
};

const PAYLOAD_PREFIX: &str = "encoded_";

/// Mock encoder: one qubit per character, base64 payload, fixed metrics.
/// WARNING: no quantum state is involved - for development and tests only!
#[derive(Debug, Clone)]
pub struct MockEncoder {
    id_prefix: String,
    metrics: Metrics,
}

impl MockEncoder {
    pub fn new(id_prefix: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            metrics,
        }
    }

    /// Recover the text from a payload produced by [`MockEncoder::encode`].
    fn read_payload(quantum_data: &str) -> Result<String> {
        let bytes = BASE64
            .decode(quantum_data)
            .map_err(|e| CoreError::Decoding(format!("payload is not base64: {}", e)))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| CoreError::Decoding(format!("payload is not UTF-8: {}", e)))?;

        text.strip_prefix(PAYLOAD_PREFIX)
            .map(str::to_string)
            .ok_or_else(|| CoreError::Decoding("payload missing encoding marker".into()))
    }
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new(
            "BiMO",
            Metrics {
                fidelity: 0.95,
                error_rate: 0.05,
                coherence: 0.92,
            },
        )
    }
}

#[async_trait]
impl QuantumEncoder for MockEncoder {
    async fn encode(&self, message: &str) -> Result<PackageDraft> {
        let qubits_count = u32::try_from(message.chars().count())
            .map_err(|_| CoreError::Encoding("message too long to encode".into()))?;

        Ok(PackageDraft {
            id: format!("{}-{}", self.id_prefix, Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            quantum_data: BASE64.encode(format!("{PAYLOAD_PREFIX}{message}")),
            qubits_count,
        })
    }

    async fn decode(
        &self,
        package: &Package,
        measurements: &[Measurement],
    ) -> Result<DecodeOutcome> {
        let text = Self::read_payload(&package.quantum_data)?;

        tracing::debug!(
            package_id = %package.id,
            measurements = measurements.len(),
            "Mock decode"
        );

        Ok(DecodeOutcome {
            text,
            status: TransmissionStatus::Success,
            metrics: self.metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageOptions;

    #[tokio::test]
    async fn test_encode_counts_one_qubit_per_character() {
        let encoder = MockEncoder::default();
        let draft = encoder.encode("hello").await.unwrap();
        assert_eq!(draft.qubits_count, 5);
        assert!(draft.id.starts_with("BiMO-"));

        // Multi-byte characters count once
        let draft = encoder.encode("héllo⚛").await.unwrap();
        assert_eq!(draft.qubits_count, 6);
    }

    #[tokio::test]
    async fn test_encode_issues_fresh_ids_for_identical_input() {
        let encoder = MockEncoder::default();
        let first = encoder.encode("same").await.unwrap();
        let second = encoder.encode("same").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.qubits_count, second.qubits_count);
        assert_eq!(first.quantum_data, second.quantum_data);
    }

    #[tokio::test]
    async fn test_decode_recovers_text_and_metrics() {
        let encoder = MockEncoder::default();
        let draft = encoder.encode("hello world").await.unwrap();
        let package = Package::from_draft(draft, "1", PackageOptions::default(), Utc::now());

        let measurements = vec![serde_json::json!({"energy": 5.5})];
        let outcome = encoder.decode(&package, &measurements).await.unwrap();

        assert_eq!(outcome.text, "hello world");
        assert_eq!(outcome.status, TransmissionStatus::Success);
        assert_eq!(outcome.metrics.fidelity, 0.95);
        assert_eq!(outcome.metrics.error_rate, 0.05);
        assert_eq!(outcome.metrics.coherence, 0.92);
    }

    #[tokio::test]
    async fn test_decode_rejects_foreign_payload() {
        let encoder = MockEncoder::default();
        let draft = encoder.encode("hello").await.unwrap();
        let mut package =
            Package::from_draft(draft, "1", PackageOptions::default(), Utc::now());
        package.quantum_data = "!!not-base64!!".to_string();

        let err = encoder.decode(&package, &[]).await.unwrap_err();
        assert!(matches!(err, CoreError::Decoding(_)));
    }
}
