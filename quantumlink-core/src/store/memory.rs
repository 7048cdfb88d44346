//! In-memory package store
//!
//! Packages, the per-owner index and metrics live in `DashMap`s, so each
//! operation is atomic per key. Everything is lost when the store is dropped.

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use super::PackageStore;
use crate::error::{CoreError, Result};
use crate::package::{Metrics, Package};

#[derive(Default)]
pub struct InMemoryStore {
    /// package_id -> package
    packages: DashMap<String, Package>,
    /// owner_id -> package ids in insertion order
    by_owner: DashMap<String, Vec<String>>,
    /// package_id -> latest metrics
    metrics: DashMap<String, Metrics>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored packages across all owners
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }
}

#[async_trait]
impl PackageStore for InMemoryStore {
    async fn save(&self, owner: &str, package: Package) -> Result<()> {
        if !package.is_owned_by(owner) {
            return Err(CoreError::Storage(format!(
                "package {} is owned by {}, not {}",
                package.id, package.owner_id, owner
            )));
        }

        let id = package.id.clone();
        match self.packages.entry(id.clone()) {
            Entry::Occupied(_) => return Err(CoreError::DuplicatePackage(id)),
            Entry::Vacant(slot) => {
                slot.insert(package);
            }
        }

        self.by_owner
            .entry(owner.to_string())
            .or_default()
            .push(id.clone());

        tracing::info!(package_id = %id, owner = %owner, "Package saved");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Package>> {
        Ok(self.packages.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_metrics(&self, id: &str, metrics: Metrics) -> Result<()> {
        if !self.packages.contains_key(id) {
            return Err(CoreError::PackageNotFound(id.to_string()));
        }

        self.metrics.insert(id.to_string(), metrics);
        tracing::info!(package_id = %id, "Metrics updated");
        Ok(())
    }

    async fn find_metrics(&self, id: &str) -> Result<Option<Metrics>> {
        Ok(self.metrics.get(id).map(|entry| *entry.value()))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Package>> {
        let ids = self
            .by_owner
            .get(owner)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        Ok(ids
            .iter()
            .filter_map(|id| self.packages.get(id).map(|entry| entry.value().clone()))
            .collect())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("packages", &self.packages.len())
            .field("owners", &self.by_owner.len())
            .field("metrics", &self.metrics.len())
            .finish()
    }
}
