//! User service for registration, credential validation and management

use std::sync::Arc;

use tracing::warn;

use crate::domain::user::{
    validate_email, validate_password, PublicUser, User, UserId, UserPatch, UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::auth::AuthOutcome;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request for updating a user
///
/// `password` is re-hashed only when supplied and non-empty; otherwise the
/// stored hash is left untouched.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// User service for authentication and management
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Hashing is CPU-bound; run it off the async scheduler
    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Verification task failed: {}", e)))
    }

    /// Register a new user
    ///
    /// A duplicate email yields the uniform failure outcome, the same shape
    /// a failed login produces, so registration cannot be used to probe
    /// which addresses hold accounts.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<AuthOutcome, DomainError> {
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&request.email).await? {
            return Ok(AuthOutcome::failure());
        }

        let password_hash = self.hash_password(request.password).await?;
        let user = User::new(request.email, password_hash, request.name);

        match self.repository.create(user).await {
            Ok(created) => Ok(AuthOutcome::success(created.to_public())),
            // Lost a race on the unique email index
            Err(DomainError::Conflict { .. }) => Ok(AuthOutcome::failure()),
            Err(e) => Err(e),
        }
    }

    /// Check an email/password pair against stored state
    ///
    /// Returns the uniform outcome in every case. A missing account, a wrong
    /// password, and a store fault are indistinguishable to the caller.
    pub async fn validate_credentials(&self, email: &str, password: &str) -> AuthOutcome {
        let user = match self.repository.find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => return AuthOutcome::failure(),
            Err(e) => {
                warn!(error = %e, "Store failure during credential validation");
                return AuthOutcome::failure();
            }
        };

        match self
            .verify_password(password.to_string(), user.password_hash().to_string())
            .await
        {
            Ok(true) => AuthOutcome::success(user.to_public()),
            Ok(false) => AuthOutcome::failure(),
            Err(e) => {
                warn!(error = %e, "Verification failure during credential validation");
                AuthOutcome::failure()
            }
        }
    }

    /// Get a user by ID
    pub async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.repository.find_by_id(id).await
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Count all users
    pub async fn count(&self) -> Result<u64, DomainError> {
        self.repository.count().await
    }

    /// Update a user
    ///
    /// The password hash is replaced only when the request supplies a new
    /// non-empty secret.
    pub async fn update(
        &self,
        id: &UserId,
        request: UpdateUserRequest,
    ) -> Result<Option<User>, DomainError> {
        if let Some(email) = &request.email {
            validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let password = request.password.filter(|p| !p.is_empty());

        let password_hash = match password {
            Some(password) => {
                validate_password(&password)
                    .map_err(|e| DomainError::validation(e.to_string()))?;
                Some(self.hash_password(password).await?)
            }
            None => None,
        };

        let patch = UserPatch {
            email: request.email,
            name: request.name,
            password_hash,
        };

        self.repository.update(id, patch).await
    }

    /// Remove a user, returning the removed record
    pub async fn remove(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.repository.delete(id).await
    }
}

/// Helper for the token path: strips the hash for client-facing use
pub fn to_public_list(users: Vec<User>) -> Vec<PublicUser> {
    users.iter().map(User::to_public).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::repository::mock::MockUserRepository;
    use crate::infrastructure::auth::outcome::INVALID_CREDENTIALS;
    use crate::infrastructure::user::password::Argon2Hasher;

    fn service() -> UserService {
        UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(Argon2Hasher::default()),
        )
    }

    fn service_with_repo(repo: Arc<MockUserRepository>) -> UserService {
        UserService::new(repo, Arc::new(Argon2Hasher::default()))
    }

    fn register_request(email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            email: email.to_string(),
            password: "correct horse".to_string(),
            name: "Ada".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service();

        let outcome = service.register(register_request("a@x.com")).await.unwrap();
        assert!(outcome.success);

        let user = outcome.user.unwrap();
        let stored = service.get(&user.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash(), "correct horse");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_uniform_failure() {
        let service = service();
        service.register(register_request("a@x.com")).await.unwrap();

        let outcome = service.register(register_request("a@x.com")).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, INVALID_CREDENTIALS);
        assert!(outcome.user.is_none());

        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let service = service();

        let bad_email = RegisterUserRequest {
            email: "not-an-email".to_string(),
            ..register_request("ignored@x.com")
        };
        assert!(matches!(
            service.register(bad_email).await,
            Err(DomainError::Validation { .. })
        ));

        let bad_password = RegisterUserRequest {
            password: "short".to_string(),
            ..register_request("a@x.com")
        };
        assert!(matches!(
            service.register(bad_password).await,
            Err(DomainError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_validate_credentials_success_strips_hash() {
        let service = service();
        service.register(register_request("a@x.com")).await.unwrap();

        let outcome = service.validate_credentials("a@x.com", "correct horse").await;

        assert!(outcome.success);
        let user = outcome.user.unwrap();
        assert_eq!(user.email, "a@x.com");

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let service = service();
        service.register(register_request("a@x.com")).await.unwrap();

        let wrong_password = service.validate_credentials("a@x.com", "wrong").await;
        let unknown_email = service.validate_credentials("b@x.com", "correct horse").await;

        assert!(!wrong_password.success);
        assert!(!unknown_email.success);
        assert_eq!(wrong_password.message, unknown_email.message);
        assert_eq!(wrong_password.message, INVALID_CREDENTIALS);
        assert!(wrong_password.token.is_none() && unknown_email.token.is_none());
        assert!(wrong_password.user.is_none() && unknown_email.user.is_none());
    }

    #[tokio::test]
    async fn test_store_failure_collapses_to_uniform_failure() {
        let repo = Arc::new(MockUserRepository::new());
        let service = service_with_repo(Arc::clone(&repo));

        repo.set_should_fail(true).await;

        let outcome = service.validate_credentials("a@x.com", "correct horse").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_hash() {
        let service = service();
        let outcome = service.register(register_request("a@x.com")).await.unwrap();
        let id = outcome.user.unwrap().id;

        let before = service.get(&id).await.unwrap().unwrap();

        let request = UpdateUserRequest {
            name: Some("Grace".to_string()),
            password: Some(String::new()),
            ..UpdateUserRequest::default()
        };
        let updated = service.update(&id, request).await.unwrap().unwrap();

        assert_eq!(updated.name(), "Grace");
        assert_eq!(updated.password_hash(), before.password_hash());
    }

    #[tokio::test]
    async fn test_update_with_password_rehashes() {
        let service = service();
        let outcome = service.register(register_request("a@x.com")).await.unwrap();
        let id = outcome.user.unwrap().id;

        let request = UpdateUserRequest {
            password: Some("new password".to_string()),
            ..UpdateUserRequest::default()
        };
        service.update(&id, request).await.unwrap().unwrap();

        let new_login = service.validate_credentials("a@x.com", "new password").await;
        assert!(new_login.success);

        let old_login = service.validate_credentials("a@x.com", "correct horse").await;
        assert!(!old_login.success);
    }

    #[tokio::test]
    async fn test_remove() {
        let service = service();
        let outcome = service.register(register_request("a@x.com")).await.unwrap();
        let id = outcome.user.unwrap().id;

        let removed = service.remove(&id).await.unwrap().unwrap();
        assert_eq!(removed.email(), "a@x.com");

        assert!(service.get(&id).await.unwrap().is_none());
        assert!(service.remove(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_returns_public_safe_users() {
        let service = service();
        service.register(register_request("a@x.com")).await.unwrap();
        service.register(register_request("b@x.com")).await.unwrap();

        let public = to_public_list(service.list().await.unwrap());
        assert_eq!(public.len(), 2);
    }
}
