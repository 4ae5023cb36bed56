//! Store-backed user repository

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::store::EntityStore;
use crate::domain::user::{User, UserFilter, UserId, UserPatch, UserRepository};
use crate::domain::DomainError;

/// User repository backed by the generic entity store
pub struct StoreUserRepository {
    store: Arc<dyn EntityStore<User>>,
}

impl StoreUserRepository {
    pub fn new(store: Arc<dyn EntityStore<User>>) -> Self {
        Self { store }
    }
}

impl Debug for StoreUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreUserRepository").finish()
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let user = self.store.find_one(&UserFilter::by_id(id.clone())).await?;

        if user.is_none() {
            warn!(user_id = %id, "User not found by id");
        }

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let user = self.store.find_one(&UserFilter::by_email(email)).await?;

        if user.is_none() {
            warn!("User not found by email");
        }

        Ok(user)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.store.create(user).await
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let updated = self
            .store
            .find_one_and_update(&UserFilter::by_id(id.clone()), &patch)
            .await?;

        if updated.is_none() {
            warn!(user_id = %id, "User not updated on find and update");
        }

        Ok(updated)
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.store
            .find_one_and_delete(&UserFilter::by_id(id.clone()))
            .await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.store.find(&UserFilter::all()).await
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.store.count(&UserFilter::all()).await
    }
}
