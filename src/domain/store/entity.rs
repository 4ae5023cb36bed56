//! Store entity traits and types

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for server-generated entity identifiers
pub trait EntityId: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Generates a fresh unique identifier
    fn generate() -> Self;

    /// Returns the identifier as a string for backends that key by string
    fn as_str(&self) -> &str;
}

/// Structured filter over an entity type
///
/// Filters are explicit typed shapes rather than open-ended maps, so a
/// misspelled field cannot silently match nothing.
pub trait EntityFilter<E>: Debug + Send + Sync {
    /// Returns true if the entity satisfies every condition in the filter
    fn matches(&self, entity: &E) -> bool;
}

/// Structured patch over an entity type
pub trait EntityPatch<E>: Debug + Send + Sync {
    /// Applies the patch to the entity in place
    fn apply(&self, entity: &mut E);
}

/// Trait for types that can be persisted in an entity store
pub trait StoreEntity:
    Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// The identifier type for this entity
    type Id: EntityId;

    /// The filter shape accepted by store queries
    type Filter: EntityFilter<Self>;

    /// The patch shape accepted by store updates
    type Patch: EntityPatch<Self>;

    /// Named fields usable for grouping and uniqueness constraints
    type Field: Copy + Debug + Eq + Send + Sync + 'static;

    /// Returns the entity's identifier
    fn id(&self) -> &Self::Id;

    /// Replaces the entity's identifier; the store calls this on create
    fn set_id(&mut self, id: Self::Id);

    /// Returns the textual value of a named field
    fn field_text(&self, field: Self::Field) -> String;

    /// Fields whose values must be unique across all stored entities
    fn unique_fields() -> &'static [Self::Field] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct TestId(String);

    impl EntityId for TestId {
        fn generate() -> Self {
            Self(uuid::Uuid::new_v4().to_string())
        }

        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug)]
    struct NameFilter(Option<String>);

    impl EntityFilter<TestEntity> for NameFilter {
        fn matches(&self, entity: &TestEntity) -> bool {
            self.0.as_deref().is_none_or(|name| entity.name == name)
        }
    }

    #[derive(Debug)]
    struct NamePatch(Option<String>);

    impl EntityPatch<TestEntity> for NamePatch {
        fn apply(&self, entity: &mut TestEntity) {
            if let Some(name) = &self.0 {
                entity.name = name.clone();
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestField {
        Name,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestEntity {
        id: TestId,
        name: String,
    }

    impl StoreEntity for TestEntity {
        type Id = TestId;
        type Filter = NameFilter;
        type Patch = NamePatch;
        type Field = TestField;

        fn id(&self) -> &Self::Id {
            &self.id
        }

        fn set_id(&mut self, id: Self::Id) {
            self.id = id;
        }

        fn field_text(&self, field: Self::Field) -> String {
            match field {
                TestField::Name => self.name.clone(),
            }
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(TestId::generate(), TestId::generate());
    }

    #[test]
    fn test_filter_matches() {
        let entity = TestEntity {
            id: TestId::generate(),
            name: "Test".to_string(),
        };

        assert!(NameFilter(None).matches(&entity));
        assert!(NameFilter(Some("Test".to_string())).matches(&entity));
        assert!(!NameFilter(Some("Other".to_string())).matches(&entity));
    }

    #[test]
    fn test_patch_applies() {
        let mut entity = TestEntity {
            id: TestId::generate(),
            name: "Test".to_string(),
        };

        NamePatch(None).apply(&mut entity);
        assert_eq!(entity.name, "Test");

        NamePatch(Some("Renamed".to_string())).apply(&mut entity);
        assert_eq!(entity.name, "Renamed");
    }
}
