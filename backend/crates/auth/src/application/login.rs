//! Login Use Case
//!
//! Checks a user name / password pair against the store.

use std::sync::{Arc, OnceLock};

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Plain text behind the stand-in hash
const DUMMY_PASSWORD: &str = "dummy-password";

/// Stand-in hash, built lazily with the service's pepper
pub type DummyHash = Arc<OnceLock<Option<UserPassword>>>;

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user_name: UserName,
}

/// Login use case
///
/// Every failure is `AuthError::InvalidCredentials`, whether the user is
/// unknown, the password is wrong or empty, or the stored hash is unusable.
/// Each of those paths still performs one Argon2 verification.
pub struct LoginUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
    dummy_hash: DummyHash,
}

impl<S> LoginUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>, dummy_hash: DummyHash) -> Self {
        Self {
            store,
            config,
            dummy_hash,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let users = self.store.load().await?;

        let user_name = UserName::new(&input.user_name).ok();
        let raw_password = RawPassword::new(input.password).ok();

        let stored_hash = user_name.as_ref().and_then(|name| {
            let phc = users.get(name)?;
            match UserPassword::from_phc_string(phc) {
                Ok(hash) => Some(hash),
                Err(_) => {
                    tracing::warn!(user_name = %name, "Stored password hash is not a valid PHC string");
                    None
                }
            }
        });

        let pepper = self.config.password_pepper.clone();
        let dummy_hash = self.dummy_hash.clone();
        let password_valid =
            tokio::task::spawn_blocking(move || match (stored_hash, raw_password) {
                (Some(hash), Some(password)) => hash.verify(&password, pepper.as_deref()),
                (_, password) => {
                    verify_dummy(&dummy_hash, password.as_ref(), pepper.as_deref());
                    false
                }
            })
            .await?;

        match user_name {
            Some(user_name) if password_valid => {
                tracing::info!(user_name = %user_name, "User signed in");
                Ok(LoginOutput { user_name })
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

/// Spend one verification against the stand-in hash
///
/// Blocking; call it from `spawn_blocking`.
fn verify_dummy(
    dummy_hash: &OnceLock<Option<UserPassword>>,
    password: Option<&RawPassword>,
    pepper: Option<&[u8]>,
) {
    let dummy = dummy_hash.get_or_init(|| {
        let raw = RawPassword::new(DUMMY_PASSWORD.to_string()).ok()?;
        UserPassword::from_raw(&raw, pepper).ok()
    });
    let Some(dummy) = dummy else {
        return;
    };

    match password {
        Some(password) => {
            let _ = dummy.verify(password, pepper);
        }
        None => {
            // Empty input: verify something of the same shape instead.
            if let Ok(placeholder) = RawPassword::new(DUMMY_PASSWORD.to_string()) {
                let _ = dummy.verify(&placeholder, pepper);
            }
        }
    }
}
