//! Authentication API endpoints
//!
//! Login follows a strict two-step flow: the credential validator runs
//! first, and only a successful outcome reaches the token issuer.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, error};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::PublicUser;
use crate::infrastructure::auth::AuthOutcome;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(get_current_user))
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login with email and password
///
/// POST /auth/login
///
/// On success the response body carries the token and the session cookie
/// is set with the same expiry. On failure the uniform outcome is returned
/// with no cookie.
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    let outcome = state
        .user_service
        .validate_credentials(&request.email, &request.password)
        .await;

    let Some(user) = outcome.user.clone().filter(|_| outcome.success) else {
        return (StatusCode::UNAUTHORIZED, Json(AuthOutcome::failure())).into_response();
    };

    let issued = match state.jwt_service.issue(&user) {
        Ok(issued) => issued,
        Err(e) => {
            error!(error = %e, "Token issuance failed after successful validation");
            return ApiError::internal("Internal server error").into_response();
        }
    };

    debug!(user_id = %user.id, "Login successful, session token issued");

    let cookie = session_cookie(&state.cookie_name, &issued.token, issued.expires_at);
    let mut response =
        (StatusCode::OK, Json(outcome.with_token(issued.token))).into_response();

    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().insert(header::SET_COOKIE, value);
            response
        }
        Err(e) => {
            error!(error = %e, "Session cookie could not be encoded");
            ApiError::internal("Internal server error").into_response()
        }
    }
}

/// Get the currently authenticated user
///
/// GET /auth/me
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<PublicUser>, ApiError> {
    Ok(Json(user))
}

/// Builds the HTTP-only session cookie with the token's expiry
fn session_cookie(name: &str, token: &str, expires_at: DateTime<Utc>) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Expires={}",
        name,
        token,
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_support::test_state;
    use crate::infrastructure::auth::outcome::{INVALID_CREDENTIALS, LOGIN_SUCCESSFUL};
    use crate::infrastructure::user::RegisterUserRequest;

    async fn seeded_state() -> AppState {
        let state = test_state();

        state
            .user_service
            .register(RegisterUserRequest {
                email: "a@x.com".to_string(),
                password: "correct horse".to_string(),
                name: "Ada".to_string(),
            })
            .await
            .unwrap();

        state
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_success_sets_cookie_and_token() {
        let state = seeded_state().await;

        let response = login(
            State(state),
            Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "correct horse".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("Authentication="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Expires="));

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], LOGIN_SUCCESSFUL);
        assert!(!body["token"].as_str().unwrap().is_empty());
        assert_eq!(body["user"]["email"], "a@x.com");
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_failure_is_uniform_without_cookie() {
        let state = seeded_state().await;

        let wrong_password = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await;

        let unknown_email = login(
            State(state),
            Json(LoginRequest {
                email: "nobody@x.com".to_string(),
                password: "correct horse".to_string(),
            }),
        )
        .await;

        for response in [wrong_password, unknown_email] {
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(response.headers().get(header::SET_COOKIE).is_none());

            let body = body_json(response).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], INVALID_CREDENTIALS);
            assert_eq!(body["token"], serde_json::Value::Null);
            assert_eq!(body["user"], serde_json::Value::Null);
        }
    }

    #[tokio::test]
    async fn test_issued_token_resolves_current_user() {
        let state = seeded_state().await;

        let outcome = state
            .user_service
            .validate_credentials("a@x.com", "correct horse")
            .await;
        let user = outcome.user.unwrap();
        let issued = state.jwt_service.issue(&user).unwrap();

        let resolved = state
            .authenticator
            .authenticate(crate::infrastructure::auth::Credentials::Token {
                token: issued.token,
            })
            .await
            .unwrap();

        let Json(current) = get_current_user(RequireUser(resolved)).await.unwrap();
        assert_eq!(current.email, "a@x.com");
        assert_eq!(current.id, user.id);
    }

    #[test]
    fn test_session_cookie_format() {
        let expires = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let cookie = session_cookie("Authentication", "tok", expires);

        assert_eq!(
            cookie,
            "Authentication=tok; HttpOnly; Path=/; SameSite=Lax; \
             Expires=Thu, 01 Jan 1970 00:00:00 GMT"
        );
    }
}
