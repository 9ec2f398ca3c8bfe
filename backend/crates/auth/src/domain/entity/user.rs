//! User Entity
//!
//! One record of the credential store.

use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};

/// User record: a unique name and its password hash
///
/// There is no other profile data. The plaintext password is never part of
/// the record.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique, case-sensitive handle
    pub user_name: UserName,
    /// Argon2id hash of the password
    pub password_hash: UserPassword,
}

impl User {
    pub fn new(user_name: UserName, password_hash: UserPassword) -> Self {
        Self {
            user_name,
            password_hash,
        }
    }
}
