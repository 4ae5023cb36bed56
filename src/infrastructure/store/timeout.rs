//! Deadline-enforcing store decorator

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::store::{EntityStore, GroupCount, PipelineStage, StoreEntity};
use crate::domain::DomainError;

/// Wraps another store and imposes a bounded deadline on every call
///
/// An expired deadline is reported as a storage fault; the caller sees the
/// store as unavailable rather than hanging on it.
#[derive(Debug)]
pub struct TimedStore<S> {
    inner: S,
    deadline: Duration,
}

impl<S> TimedStore<S> {
    pub fn new(inner: S, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    async fn run<T>(
        &self,
        operation: impl Future<Output = Result<T, DomainError>> + Send,
    ) -> Result<T, DomainError> {
        match tokio::time::timeout(self.deadline, operation).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::storage(format!(
                "Store operation exceeded {}ms deadline",
                self.deadline.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl<E, S> EntityStore<E> for TimedStore<S>
where
    E: StoreEntity,
    S: EntityStore<E>,
{
    async fn create(&self, entity: E) -> Result<E, DomainError> {
        self.run(self.inner.create(entity)).await
    }

    async fn find_one(&self, filter: &E::Filter) -> Result<Option<E>, DomainError> {
        self.run(self.inner.find_one(filter)).await
    }

    async fn find(&self, filter: &E::Filter) -> Result<Vec<E>, DomainError> {
        self.run(self.inner.find(filter)).await
    }

    async fn find_one_and_update(
        &self,
        filter: &E::Filter,
        patch: &E::Patch,
    ) -> Result<Option<E>, DomainError> {
        self.run(self.inner.find_one_and_update(filter, patch)).await
    }

    async fn find_one_and_delete(&self, filter: &E::Filter) -> Result<Option<E>, DomainError> {
        self.run(self.inner.find_one_and_delete(filter)).await
    }

    async fn update_one(&self, filter: &E::Filter, patch: &E::Patch) -> Result<bool, DomainError> {
        self.run(self.inner.update_one(filter, patch)).await
    }

    async fn update_many(
        &self,
        filter: &E::Filter,
        patch: &E::Patch,
    ) -> Result<u64, DomainError> {
        self.run(self.inner.update_many(filter, patch)).await
    }

    async fn delete_one(&self, filter: &E::Filter) -> Result<bool, DomainError> {
        self.run(self.inner.delete_one(filter)).await
    }

    async fn delete_many(&self, filter: &E::Filter) -> Result<u64, DomainError> {
        self.run(self.inner.delete_many(filter)).await
    }

    async fn count(&self, filter: &E::Filter) -> Result<u64, DomainError> {
        self.run(self.inner.count(filter)).await
    }

    async fn aggregate(&self, pipeline: &[PipelineStage<E>]) -> Result<Vec<E>, DomainError> {
        self.run(self.inner.aggregate(pipeline)).await
    }

    async fn group_by(
        &self,
        field: E::Field,
        filter: &E::Filter,
    ) -> Result<Vec<GroupCount>, DomainError> {
        self.run(self.inner.group_by(field, filter)).await
    }
}
