//! Entity store trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::DomainError;

use super::entity::StoreEntity;

/// One stage of a typed aggregation pipeline
#[derive(Debug)]
pub enum PipelineStage<E: StoreEntity> {
    /// Keep only entities matching the filter
    Match(E::Filter),
    /// Skip the first N entities
    Skip(usize),
    /// Keep at most N entities
    Limit(usize),
}

/// Count of entities sharing one distinct value of a grouping field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

/// Generic store for filter-based CRUD and aggregation over one entity type
///
/// Single-entity lookups report absence as `Ok(None)`, never as an error;
/// errors are reserved for genuine store faults. `create` always assigns a
/// fresh server-side identifier, ignoring whatever the input carries. All
/// operations are atomic per entity; nothing spans multiple entities.
#[async_trait]
pub trait EntityStore<E>: Send + Sync + Debug
where
    E: StoreEntity,
{
    /// Persists a new entity under a freshly generated identifier
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Returns the first entity matching the filter, if any
    async fn find_one(&self, filter: &E::Filter) -> Result<Option<E>, DomainError>;

    /// Returns all entities matching the filter; order is store-defined
    async fn find(&self, filter: &E::Filter) -> Result<Vec<E>, DomainError>;

    /// Patches the first matching entity and returns the updated value
    async fn find_one_and_update(
        &self,
        filter: &E::Filter,
        patch: &E::Patch,
    ) -> Result<Option<E>, DomainError>;

    /// Removes the first matching entity and returns it
    async fn find_one_and_delete(&self, filter: &E::Filter) -> Result<Option<E>, DomainError>;

    /// Patches the first matching entity, returns whether one was updated
    async fn update_one(&self, filter: &E::Filter, patch: &E::Patch) -> Result<bool, DomainError> {
        Ok(self.find_one_and_update(filter, patch).await?.is_some())
    }

    /// Patches every matching entity, returns how many were updated
    async fn update_many(&self, filter: &E::Filter, patch: &E::Patch)
        -> Result<u64, DomainError>;

    /// Removes the first matching entity, returns whether one was removed
    async fn delete_one(&self, filter: &E::Filter) -> Result<bool, DomainError> {
        Ok(self.find_one_and_delete(filter).await?.is_some())
    }

    /// Removes every matching entity, returns how many were removed
    async fn delete_many(&self, filter: &E::Filter) -> Result<u64, DomainError>;

    /// Returns the number of entities matching the filter
    async fn count(&self, filter: &E::Filter) -> Result<u64, DomainError> {
        Ok(self.find(filter).await?.len() as u64)
    }

    /// Runs a typed pipeline over the stored entities
    async fn aggregate(&self, pipeline: &[PipelineStage<E>]) -> Result<Vec<E>, DomainError>;

    /// Counts matching entities per distinct value of the grouping field
    ///
    /// Evaluated as a two-stage pipeline: match the filter, then group by
    /// the field's textual value.
    async fn group_by(
        &self,
        field: E::Field,
        filter: &E::Filter,
    ) -> Result<Vec<GroupCount>, DomainError>;
}
