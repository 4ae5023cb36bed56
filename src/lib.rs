//! Account service
//!
//! User account management over a generic entity store, with:
//! - Password hashing (Argon2, per-call salt, configurable cost)
//! - Uniform credential validation that never leaks the failing check
//! - JWT session tokens delivered in the body and an HTTP-only cookie
//! - A closed set of authentication strategies (password or token)

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::error::DomainError;
use infrastructure::auth::{Authenticator, JwtConfig, JwtService};
use infrastructure::store::{InMemoryStore, TimedStore};
use infrastructure::user::{Argon2Hasher, StoreUserRepository, UserService};

/// Wire the full service graph from configuration
pub fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let store = TimedStore::new(
        InMemoryStore::new(),
        Duration::from_secs(config.store.timeout_secs),
    );
    let repository = Arc::new(StoreUserRepository::new(Arc::new(store)));

    let hasher = Arc::new(Argon2Hasher::new(config.auth.hash_cost)?);
    let user_service = Arc::new(UserService::new(repository, hasher));

    let jwt_service = Arc::new(JwtService::new(JwtConfig::new(
        &config.auth.jwt_secret,
        config.auth.jwt_ttl_secs,
    )));
    let authenticator = Arc::new(Authenticator::new(
        Arc::clone(&user_service),
        Arc::clone(&jwt_service),
    ));

    Ok(AppState::new(
        user_service,
        jwt_service,
        authenticator,
        config.auth.cookie_name.clone(),
    ))
}
