//! In-Memory Credential Store
//!
//! Same contract as the file store, without persistence. Useful for
//! embedding and tests.

use tokio::sync::RwLock;

use crate::domain::entity::user_table::UserTable;
use crate::domain::repository::CredentialStore;
use crate::error::AuthResult;

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<UserTable>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_users(users: UserTable) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> AuthResult<UserTable> {
        Ok(self.users.read().await.clone())
    }

    async fn save(&self, users: &UserTable) -> AuthResult<()> {
        *self.users.write().await = users.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = InMemoryCredentialStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_snapshot() {
        let first: UserTable = [("alice".to_string(), "h1".to_string())]
            .into_iter()
            .collect();
        let store = InMemoryCredentialStore::with_users(first.clone());
        assert_eq!(store.load().await.unwrap(), first);

        let second: UserTable = [("bob".to_string(), "h2".to_string())]
            .into_iter()
            .collect();
        store.save(&second).await.unwrap();
        assert_eq!(store.load().await.unwrap(), second);
    }
}
