//! Credential validation outcome, token issuance and guard strategies

pub mod jwt;
pub mod outcome;
pub mod strategy;

pub use jwt::{IssuedToken, JwtConfig, JwtService, SessionClaims};
pub use outcome::AuthOutcome;
pub use strategy::{Authenticator, Credentials};
