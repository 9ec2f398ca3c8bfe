//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub user_name: UserName,
}

/// Register use case
pub struct RegisterUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
    write_lock: Arc<Mutex<()>>,
}

impl<S> RegisterUseCase<S>
where
    S: CredentialStore,
{
    /// `write_lock` must be shared by everything that saves to `store`.
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>, write_lock: Arc<Mutex<()>>) -> Self {
        Self {
            store,
            config,
            write_lock,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let user_name = UserName::new(&input.user_name).map_err(|_| AuthError::Validation)?;
        let raw_password = RawPassword::new(input.password)?;

        // Load, duplicate check and save form one critical section; without
        // it two concurrent registrations can each drop the other's record.
        let _guard = self.write_lock.lock().await;

        let mut users = self.store.load().await?;
        if users.contains(&user_name) {
            return Err(AuthError::DuplicateUser);
        }

        let pepper = self.config.password_pepper.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            UserPassword::from_raw(&raw_password, pepper.as_deref())
        })
        .await??;

        let user = User::new(user_name, password_hash);
        users.insert(&user);
        self.store.save(&users).await?;

        tracing::info!(user_name = %user.user_name, users = users.len(), "User registered");

        Ok(RegisterOutput {
            user_name: user.user_name,
        })
    }
}
