//! JWT session token issuance and verification

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::PublicUser;
use crate::domain::DomainError;

/// Claims bound into a session token; never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Login email at issuance time
    pub email: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl SessionClaims {
    /// Create new claims for a user with the given validity window
    pub fn new(user: &PublicUser, ttl_secs: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(ttl_secs as i64);

        Self {
            sub: user.id.as_str().to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get user ID from claims
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Configuration for the token issuer
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Symmetric secret for signing tokens
    pub secret: String,
    /// Token time-to-live in seconds
    pub ttl_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }
}

/// A freshly minted session token with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Token issuer backed by an HS256 symmetric secret
///
/// Issues only; it never checks credentials. Callers run it strictly after
/// the credential validator has succeeded.
#[derive(Clone)]
pub struct JwtService {
    ttl_secs: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl_secs", &self.ttl_secs)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            ttl_secs: config.ttl_secs,
            encoding_key,
            decoding_key,
        }
    }

    /// Mint a signed, time-bounded token for a validated user
    pub fn issue(&self, user: &PublicUser) -> Result<IssuedToken, DomainError> {
        let claims = SessionClaims::new(user, self.ttl_secs);
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| DomainError::internal("Token expiry out of range"))?;

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token's signature and expiry, returning its claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::credential(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}
