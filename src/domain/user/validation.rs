//! Input validation for user fields

use thiserror::Error;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum accepted email length
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Validation errors for user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email must contain '@' with text on both sides")]
    MalformedEmail,

    #[error("Email cannot exceed {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    #[error("Password cannot exceed {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,
}

/// Validates an email address used as the login key
///
/// Case is preserved; this only rejects shapes that cannot be an address.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(UserValidationError::MalformedEmail);
    };

    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(UserValidationError::MalformedEmail);
    }

    Ok(())
}

/// Validates a plaintext password before hashing
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong);
    }

    Ok(())
}
