//! Package storage.
//!
//! The store owns every piece of shared mutable state in the service. Its
//! implementations decide atomicity and visibility; callers only rely on a
//! write being visible to reads that start after it returns.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::package::{Metrics, Package};

/// Store collaborator.
#[async_trait]
pub trait PackageStore: Send + Sync {
    /// Persist a new package under `owner`.
    async fn save(&self, owner: &str, package: Package) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Package>>;

    /// Attach metrics to a stored package, replacing any previous record.
    async fn update_metrics(&self, id: &str, metrics: Metrics) -> Result<()>;

    async fn find_metrics(&self, id: &str) -> Result<Option<Metrics>>;

    /// All packages of `owner`, in an order that is stable for the store.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Package>>;

    /// Check backend health (always Ok for in-process stores)
    async fn check_health(&self) -> Result<()> {
        Ok(())
    }
}
