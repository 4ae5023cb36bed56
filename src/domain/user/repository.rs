//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId, UserPatch};
use crate::domain::DomainError;

/// Repository trait for user persistence
///
/// Lookups report absence as `Ok(None)`; errors mean the store itself
/// failed.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their email (for login)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user; the store assigns a fresh ID
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Patch an existing user, returning the updated record
    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<Option<User>, DomainError>;

    /// Delete a user, returning the removed record
    async fn delete(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// List all users
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<u64, DomainError>;

    /// Check if an email is already taken
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
