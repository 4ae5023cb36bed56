//! Domain types and traits

pub mod error;
pub mod store;
pub mod user;

pub use error::DomainError;
