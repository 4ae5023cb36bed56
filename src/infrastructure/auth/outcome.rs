//! Uniform result shape for the credential path

use serde::Serialize;

use crate::domain::user::PublicUser;

/// Fixed message for every credential failure, whatever the root cause
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Message returned on a successful login
pub const LOGIN_SUCCESSFUL: &str = "Login successful";

/// Result of a credential check, identical in shape on success and failure
///
/// Failures are only constructible through [`AuthOutcome::failure`], so no
/// call site can leak which check rejected the attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
    pub token: Option<String>,
    pub user: Option<PublicUser>,
}

impl AuthOutcome {
    /// The uniform failure outcome; carries no detail by construction
    pub fn failure() -> Self {
        Self {
            success: false,
            message: INVALID_CREDENTIALS.to_string(),
            token: None,
            user: None,
        }
    }

    /// Successful check; token minting is a separate step
    pub fn success(user: PublicUser) -> Self {
        Self {
            success: true,
            message: LOGIN_SUCCESSFUL.to_string(),
            token: None,
            user: Some(user),
        }
    }

    /// Binds an issued token to a successful outcome
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;

    #[test]
    fn test_failure_shape() {
        let outcome = AuthOutcome::failure();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], INVALID_CREDENTIALS);
        assert_eq!(json["token"], serde_json::Value::Null);
        assert_eq!(json["user"], serde_json::Value::Null);
    }

    #[test]
    fn test_success_carries_user_without_token() {
        let user = User::new("a@x.com", "hashed-secret", "Ada").to_public();
        let outcome = AuthOutcome::success(user);

        assert!(outcome.success);
        assert_eq!(outcome.message, LOGIN_SUCCESSFUL);
        assert!(outcome.token.is_none());
        assert!(outcome.user.is_some());
    }

    #[test]
    fn test_with_token() {
        let user = User::new("a@x.com", "hashed-secret", "Ada").to_public();
        let outcome = AuthOutcome::success(user).with_token("jwt-token");

        assert_eq!(outcome.token.as_deref(), Some("jwt-token"));
    }

    #[test]
    fn test_success_serialization_has_no_hash() {
        let user = User::new("a@x.com", "hashed-secret", "Ada").to_public();
        let json = serde_json::to_value(AuthOutcome::success(user)).unwrap();

        assert!(json["user"].get("password_hash").is_none());
        assert_eq!(json["user"]["email"], "a@x.com");
    }
}
