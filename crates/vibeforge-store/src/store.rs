//! Project persistence
//!
//! [`ProjectStore`] is the CRUD interface the core needs from the external
//! document store; [`MemoryStore`] is the in-process implementation used by
//! tests and single-machine embedding.

use crate::error::StoreError;
use crate::record::{ProjectId, ProjectPatch, ProjectRecord, UserId};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

/// Document store keyed by project id
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Create a project owned by `owner`
    async fn create_project(
        &self,
        owner: &UserId,
        name: &str,
        description: &str,
    ) -> Result<ProjectRecord, StoreError>;

    /// Apply a partial update, bumping `updated_at`
    async fn update_project(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<ProjectRecord, StoreError>;

    /// Fetch one record
    async fn get_project(&self, id: ProjectId) -> Result<ProjectRecord, StoreError>;

    /// All records owned by `owner`, newest first
    async fn list_projects(&self, owner: &UserId) -> Result<Vec<ProjectRecord>, StoreError>;

    /// Delete one record
    async fn delete_project(&self, id: ProjectId) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<ProjectId, ProjectRecord>,
}

impl MemoryStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(
        &self,
        owner: &UserId,
        name: &str,
        description: &str,
    ) -> Result<ProjectRecord, StoreError> {
        let record = ProjectRecord::new(owner.clone(), name, description);
        tracing::info!(project = %record.id, owner = %owner, "creating project");
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<ProjectRecord, StoreError> {
        let mut entry = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(description) = patch.description {
            entry.description = description;
        }
        if let Some(code) = patch.code {
            entry.code = Some(code);
        }
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn get_project(&self, id: ProjectId) -> Result<ProjectRecord, StoreError> {
        self.records
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_projects(&self, owner: &UserId) -> Result<Vec<ProjectRecord>, StoreError> {
        let mut records: Vec<ProjectRecord> = self
            .records
            .iter()
            .filter(|entry| &entry.owner == owner)
            .map(|entry| entry.clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), StoreError> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
