//! Verification strategies for gating protected operations

use std::sync::Arc;

use crate::domain::user::{PublicUser, UserId};
use crate::domain::DomainError;
use crate::infrastructure::user::UserService;

use super::jwt::JwtService;
use super::outcome::INVALID_CREDENTIALS;

/// How a request proves its identity
///
/// A closed set: the guard dispatches on the variant, never on the shape of
/// the incoming request.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Login attempt carrying the identifying field and secret
    Password { email: String, password: String },
    /// Previously issued session token
    Token { token: String },
}

/// Resolves an identity from presented credentials
///
/// Stateless; its only effect is returning the resolved user. Every failure
/// collapses to one credential error with a fixed message.
#[derive(Debug, Clone)]
pub struct Authenticator {
    users: Arc<UserService>,
    jwt: Arc<JwtService>,
}

impl Authenticator {
    pub fn new(users: Arc<UserService>, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    /// Verify credentials and resolve the identity they prove
    pub async fn authenticate(&self, credentials: Credentials) -> Result<PublicUser, DomainError> {
        match credentials {
            Credentials::Password { email, password } => {
                let outcome = self.users.validate_credentials(&email, &password).await;

                match outcome.user {
                    Some(user) if outcome.success => Ok(user),
                    _ => Err(DomainError::credential(INVALID_CREDENTIALS)),
                }
            }
            Credentials::Token { token } => {
                // Signature and expiry are checked here; the password path
                // is never touched for token-bearing requests
                let claims = self
                    .jwt
                    .verify(&token)
                    .map_err(|_| DomainError::credential(INVALID_CREDENTIALS))?;

                let user = self
                    .users
                    .get(&UserId::new(claims.user_id()))
                    .await
                    .map_err(|_| DomainError::credential(INVALID_CREDENTIALS))?
                    .ok_or_else(|| DomainError::credential(INVALID_CREDENTIALS))?;

                Ok(user.to_public())
            }
        }
    }
}
