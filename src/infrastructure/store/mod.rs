//! Entity store implementations

pub mod in_memory;
pub mod timeout;

pub use in_memory::InMemoryStore;
pub use timeout::TimedStore;
