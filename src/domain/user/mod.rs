//! User domain model

pub mod entity;
pub mod repository;
pub mod validation;

pub use entity::{PublicUser, User, UserField, UserFilter, UserId, UserPatch};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_password, UserValidationError};
