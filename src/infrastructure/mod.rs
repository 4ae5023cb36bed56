//! Infrastructure implementations of the domain contracts

pub mod auth;
pub mod logging;
pub mod store;
pub mod user;
