//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::store::{EntityFilter, EntityId, EntityPatch, StoreEntity};

/// User identifier, generated by the store at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps an existing identifier string (e.g. from a request path)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EntityId for UserId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identity record
///
/// The password hash never serializes outward; client-facing views go
/// through [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    /// Unique login key; case is preserved as supplied
    email: String,
    #[serde(skip_serializing)]
    password_hash: String,
    /// Display name, opaque to the auth core
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user; the store replaces the id on create
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::generate(),
            email: email.into(),
            password_hash: password_hash.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the client-safe view with the password hash stripped
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User view safe to return to a client; carries no password material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Named user fields for grouping and uniqueness constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Email,
    Name,
}

/// Typed filter over users; empty means match-all
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub id: Option<UserId>,
    pub email: Option<String>,
}

impl UserFilter {
    /// Matches every user
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: UserId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

impl EntityFilter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        if self.id.as_ref().is_some_and(|id| id != &user.id) {
            return false;
        }

        if self.email.as_ref().is_some_and(|email| email != &user.email) {
            return false;
        }

        true
    }
}

/// Typed patch over users
///
/// `password_hash` is `None` unless an update explicitly supplied a new
/// plaintext secret; an absent value never clears the stored hash.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

impl EntityPatch<User> for UserPatch {
    fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }

        if let Some(name) = &self.name {
            user.name = name.clone();
        }

        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }

        user.updated_at = Utc::now();
    }
}

impl StoreEntity for User {
    type Id = UserId;
    type Filter = UserFilter;
    type Patch = UserPatch;
    type Field = UserField;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }

    fn field_text(&self, field: Self::Field) -> String {
        match field {
            UserField::Email => self.email.clone(),
            UserField::Name => self.name.clone(),
        }
    }

    fn unique_fields() -> &'static [Self::Field] {
        &[UserField::Email]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new("a@x.com", "hashed-secret", "Ada")
    }

    #[test]
    fn test_public_view_has_no_hash() {
        let public = user().to_public();
        let json = serde_json::to_value(&public).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_filter_by_email() {
        let u = user();

        assert!(UserFilter::by_email("a@x.com").matches(&u));
        assert!(!UserFilter::by_email("b@x.com").matches(&u));
        assert!(UserFilter::all().matches(&u));
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let u = user();
        assert!(!UserFilter::by_email("A@X.COM").matches(&u));
    }

    #[test]
    fn test_patch_without_hash_preserves_it() {
        let mut u = user();

        UserPatch {
            name: Some("Grace".to_string()),
            ..UserPatch::default()
        }
        .apply(&mut u);

        assert_eq!(u.name(), "Grace");
        assert_eq!(u.password_hash(), "hashed-secret");
    }

    #[test]
    fn test_patch_with_hash_replaces_it() {
        let mut u = user();

        UserPatch {
            password_hash: Some("new-hash".to_string()),
            ..UserPatch::default()
        }
        .apply(&mut u);

        assert_eq!(u.password_hash(), "new-hash");
    }

    #[test]
    fn test_email_is_unique_field() {
        assert_eq!(User::unique_fields(), &[UserField::Email]);
    }
}
