//! Row structs that map 1-to-1 onto the `users` table, plus the write payloads.
//!
//! These are *persistence* models — they carry no HTTP behaviour.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

/// A persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    /// Generated by the store, never changes.
    pub id: i32,
    pub name: String,
    pub age: i32,
    /// Unique across all rows.
    pub email: String,
}

/// Insert payload: a [`UserRow`] without its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub age: i32,
    pub email: String,
}

/// Update payload.  Only the supplied fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A key that is present must carry a value; every column is `NOT NULL`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UserPatch {
    /// `true` when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.email.is_none()
    }

    /// Apply the supplied fields to `row` in place.
    pub fn apply_to(&self, row: &mut UserRow) {
        if let Some(name) = &self.name {
            row.name = name.clone();
        }
        if let Some(age) = self.age {
            row.age = age;
        }
        if let Some(email) = &self.email {
            row.email = email.clone();
        }
    }
}

impl From<NewUser> for UserPatch {
    fn from(user: NewUser) -> Self {
        Self {
            name: Some(user.name),
            age: Some(user.age),
            email: Some(user.email),
        }
    }
}
