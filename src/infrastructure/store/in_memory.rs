//! In-memory entity store implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::store::{
    EntityFilter, EntityId, EntityPatch, EntityStore, GroupCount, PipelineStage, StoreEntity,
};
use crate::domain::DomainError;

/// Thread-safe in-memory entity store
///
/// Keeps one collection of entities keyed by identifier with enforcement
/// of the entity's declared unique fields. Data is lost when the process
/// terminates.
#[derive(Debug)]
pub struct InMemoryStore<E>
where
    E: StoreEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStore<E>
where
    E: StoreEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStore<E>
where
    E: StoreEntity,
{
    /// Creates a new empty store
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, E>>, DomainError> {
        self.entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, E>>, DomainError> {
        self.entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

/// Checks the entity's declared unique fields against all other entities
fn check_unique<E: StoreEntity>(
    entities: &HashMap<String, E>,
    candidate: &E,
) -> Result<(), DomainError> {
    for &field in E::unique_fields() {
        let value = candidate.field_text(field);
        let taken = entities.values().any(|other| {
            other.id().as_str() != candidate.id().as_str() && other.field_text(field) == value
        });

        if taken {
            return Err(DomainError::conflict(format!(
                "Value '{}' for {:?} already exists",
                value, field
            )));
        }
    }

    Ok(())
}

#[async_trait]
impl<E> EntityStore<E> for InMemoryStore<E>
where
    E: StoreEntity,
{
    async fn create(&self, mut entity: E) -> Result<E, DomainError> {
        let mut entities = self.write()?;

        // A fresh identifier is always assigned, whatever the input carried
        entity.set_id(E::Id::generate());
        check_unique(&entities, &entity)?;

        entities.insert(entity.id().as_str().to_string(), entity.clone());
        Ok(entity)
    }

    async fn find_one(&self, filter: &E::Filter) -> Result<Option<E>, DomainError> {
        let entities = self.read()?;
        Ok(entities.values().find(|e| filter.matches(e)).cloned())
    }

    async fn find(&self, filter: &E::Filter) -> Result<Vec<E>, DomainError> {
        let entities = self.read()?;
        Ok(entities
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn find_one_and_update(
        &self,
        filter: &E::Filter,
        patch: &E::Patch,
    ) -> Result<Option<E>, DomainError> {
        let mut entities = self.write()?;

        let Some(key) = entities
            .values()
            .find(|e| filter.matches(e))
            .map(|e| e.id().as_str().to_string())
        else {
            return Ok(None);
        };

        // Patch a copy first so a uniqueness conflict leaves the entity intact
        let mut updated = entities[&key].clone();
        patch.apply(&mut updated);
        check_unique(&entities, &updated)?;

        entities.insert(key, updated.clone());
        Ok(Some(updated))
    }

    async fn find_one_and_delete(&self, filter: &E::Filter) -> Result<Option<E>, DomainError> {
        let mut entities = self.write()?;

        let Some(key) = entities
            .values()
            .find(|e| filter.matches(e))
            .map(|e| e.id().as_str().to_string())
        else {
            return Ok(None);
        };

        Ok(entities.remove(&key))
    }

    async fn update_many(
        &self,
        filter: &E::Filter,
        patch: &E::Patch,
    ) -> Result<u64, DomainError> {
        let mut entities = self.write()?;

        let keys: Vec<String> = entities
            .values()
            .filter(|e| filter.matches(e))
            .map(|e| e.id().as_str().to_string())
            .collect();

        for key in &keys {
            let mut updated = entities[key].clone();
            patch.apply(&mut updated);
            check_unique(&entities, &updated)?;
            entities.insert(key.clone(), updated);
        }

        Ok(keys.len() as u64)
    }

    async fn delete_many(&self, filter: &E::Filter) -> Result<u64, DomainError> {
        let mut entities = self.write()?;

        let keys: Vec<String> = entities
            .values()
            .filter(|e| filter.matches(e))
            .map(|e| e.id().as_str().to_string())
            .collect();

        for key in &keys {
            entities.remove(key);
        }

        Ok(keys.len() as u64)
    }

    async fn count(&self, filter: &E::Filter) -> Result<u64, DomainError> {
        let entities = self.read()?;
        Ok(entities.values().filter(|e| filter.matches(e)).count() as u64)
    }

    async fn aggregate(&self, pipeline: &[PipelineStage<E>]) -> Result<Vec<E>, DomainError> {
        let entities = self.read()?;
        let mut result: Vec<E> = entities.values().cloned().collect();

        for stage in pipeline {
            result = match stage {
                PipelineStage::Match(filter) => {
                    result.into_iter().filter(|e| filter.matches(e)).collect()
                }
                PipelineStage::Skip(n) => result.into_iter().skip(*n).collect(),
                PipelineStage::Limit(n) => result.into_iter().take(*n).collect(),
            };
        }

        Ok(result)
    }

    async fn group_by(
        &self,
        field: E::Field,
        filter: &E::Filter,
    ) -> Result<Vec<GroupCount>, DomainError> {
        let entities = self.read()?;

        let mut counts: HashMap<String, u64> = HashMap::new();

        for entity in entities.values().filter(|e| filter.matches(e)) {
            *counts.entry(entity.field_text(field)).or_insert(0) += 1;
        }

        let mut groups: Vec<GroupCount> = counts
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect();

        groups.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(groups)
    }
}
