//! Session token guard for protected operations

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::PublicUser;
use crate::infrastructure::auth::{outcome::INVALID_CREDENTIALS, Credentials};

/// Extractor that requires a valid session token
///
/// Accepts the token from either:
/// - Authorization header: `Bearer <token>`
/// - the session cookie set at login
///
/// Rejection is uniform: missing, malformed, expired and invalid-signature
/// tokens all produce the same 401 before any handler runs.
#[derive(Debug, Clone)]
pub struct RequireUser(pub PublicUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers, &state.cookie_name)
            .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

        debug!("Validating session token");

        let user = state
            .authenticator
            .authenticate(Credentials::Token { token })
            .await
            .map_err(|_| ApiError::unauthorized(INVALID_CREDENTIALS))?;

        Ok(RequireUser(user))
    }
}

/// Extract a session token from the Authorization header or the cookie
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.trim().to_string());
            }
        }
    }

    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name).then(|| value.to_string())
    })
}
