//! Generic persistence abstraction
//!
//! Every entity read or write in the system goes through an
//! [`EntityStore`], parameterized by the entity shape.

pub mod entity;
pub mod repository;

pub use entity::{EntityFilter, EntityId, EntityPatch, StoreEntity};
pub use repository::{EntityStore, GroupCount, PipelineStage};
