//! User Table
//!
//! The full credential snapshot: user name -> PHC hash string.
//! Loaded and saved as a whole; there are no per-record operations
//! against the store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::user_name::UserName;

/// In-memory snapshot of the credential store
///
/// Ordered so that serialization is deterministic. Keys are the exact
/// (trimmed, case-sensitive) user names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserTable(BTreeMap<String, String>);

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user_name: &UserName) -> bool {
        self.0.contains_key(user_name.as_str())
    }

    /// Stored PHC string for a user, if present
    pub fn get(&self, user_name: &UserName) -> Option<&str> {
        self.0.get(user_name.as_str()).map(String::as_str)
    }

    /// Add a user record
    ///
    /// Returns `false` and leaves the table untouched if the name is taken.
    pub fn insert(&mut self, user: &User) -> bool {
        if self.contains(&user.user_name) {
            return false;
        }
        self.0.insert(
            user.user_name.as_str().to_string(),
            user.password_hash.as_phc_string().to_string(),
        );
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for UserTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
