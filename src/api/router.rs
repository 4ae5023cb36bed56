use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no auth required)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints (no auth required for login)
        .nest("/auth", auth::create_auth_router())
        // User management (registration is open, the rest is guarded)
        .nest("/users", users::create_users_router())
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_support::test_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_route() {
        let router = create_router_with_state(test_state());

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_guarded_route_rejects_anonymous_requests() {
        let router = create_router_with_state(test_state());

        let response = router
            .oneshot(Request::get("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let router = create_router_with_state(test_state());

        let response = router
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
