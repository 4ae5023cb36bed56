//! User persistence, hashing and management services

pub mod password;
pub mod repository;
pub mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::StoreUserRepository;
pub use service::{RegisterUserRequest, UpdateUserRequest, UserService};
