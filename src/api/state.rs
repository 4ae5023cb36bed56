//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::{Authenticator, JwtService};
use crate::infrastructure::user::UserService;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub jwt_service: Arc<JwtService>,
    pub authenticator: Arc<Authenticator>,
    /// Name of the HTTP-only session cookie
    pub cookie_name: String,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        jwt_service: Arc<JwtService>,
        authenticator: Arc<Authenticator>,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            user_service,
            jwt_service,
            authenticator,
            cookie_name: cookie_name.into(),
        }
    }
}
