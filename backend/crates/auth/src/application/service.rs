//! Auth Service
//!
//! Facade over the register/login/logout use cases. Owns the store, the
//! config, the write lock and the login stand-in hash; every clone shares
//! them.
//!
//! Rejections (validation, duplicate, bad credentials) come back as
//! `Ok(Outcome { success: false, .. })`. Only store I/O and internal failures
//! are `Err`.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::config::AuthConfig;
use crate::application::login::{DummyHash, LoginInput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::outcome::{
    Outcome, REGISTERED_MESSAGE, SIGNED_IN_MESSAGE, SIGNED_OUT_MESSAGE,
};
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::domain::entity::session::Session;
use crate::domain::repository::CredentialStore;
use crate::error::{AuthError, AuthResult};

pub struct AuthService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
    write_lock: Arc<Mutex<()>>,
    dummy_hash: DummyHash,
}

impl<S> Clone for AuthService<S>
where
    S: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
            write_lock: self.write_lock.clone(),
            dummy_hash: self.dummy_hash.clone(),
        }
    }
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    pub fn new(store: S, config: AuthConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            write_lock: Arc::new(Mutex::new(())),
            dummy_hash: DummyHash::default(),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an account and sign the session in as it
    pub async fn register(
        &self,
        session: &mut Session,
        user_name: &str,
        password: &str,
    ) -> AuthResult<Outcome> {
        let use_case =
            RegisterUseCase::new(self.store.clone(), self.config.clone(), self.write_lock.clone());
        let input = RegisterInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        };

        match use_case.execute(input).await {
            Ok(output) => {
                session.authenticate(output.user_name);
                Ok(Outcome::success(REGISTERED_MESSAGE, session))
            }
            Err(e) => reject(e, session),
        }
    }

    /// Check credentials and sign the session in
    pub async fn login(
        &self,
        session: &mut Session,
        user_name: &str,
        password: &str,
    ) -> AuthResult<Outcome> {
        let use_case = LoginUseCase::new(
            self.store.clone(),
            self.config.clone(),
            self.dummy_hash.clone(),
        );
        let input = LoginInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        };

        match use_case.execute(input).await {
            Ok(output) => {
                session.authenticate(output.user_name);
                Ok(Outcome::success(SIGNED_IN_MESSAGE, session))
            }
            Err(e) => reject(e, session),
        }
    }

    pub fn logout(&self, session: &mut Session) -> Outcome {
        LogoutUseCase::new().execute(session);
        Outcome::success(SIGNED_OUT_MESSAGE, session)
    }
}

/// Turn a rejection into an unsuccessful outcome; pass hard failures through
fn reject(error: AuthError, session: &Session) -> AuthResult<Outcome> {
    error.log();
    match error.rejection() {
        Some(rejection) => Ok(Outcome::rejected(rejection, error.to_string(), session)),
        None => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::outcome::Rejection;
    use crate::domain::value_object::user_name::UserName;
    use crate::infra::{InMemoryCredentialStore, JsonFileCredentialStore};
    use tempfile::TempDir;

    fn memory_service() -> AuthService<InMemoryCredentialStore> {
        AuthService::new(InMemoryCredentialStore::new(), AuthConfig::development())
    }

    fn file_service(dir: &TempDir) -> AuthService<JsonFileCredentialStore> {
        let path = dir.path().join("users.json");
        AuthService::new(JsonFileCredentialStore::new(path), AuthConfig::development())
    }

    fn alice() -> UserName {
        UserName::new("alice").unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_scenarios() {
        let dir = TempDir::new().unwrap();
        let service = file_service(&dir);
        let mut session = Session::Anonymous;

        // 1. register
        let outcome = service.register(&mut session, "alice", "pw1").await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "Account created.");
        assert_eq!(outcome.session_user_name.as_deref(), Some("alice"));
        assert_eq!(session, Session::Authenticated(alice()));
        let users = service.store().load().await.unwrap();
        let original_hash = users.get(&alice()).unwrap().to_string();
        assert!(original_hash.starts_with("$argon2id$"));

        // 2. duplicate register
        let mut other = Session::Anonymous;
        let outcome = service.register(&mut other, "alice", "pw2").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.rejection, Some(Rejection::DuplicateUser));
        assert_eq!(outcome.message, "That username is already taken.");
        assert_eq!(other, Session::Anonymous);
        let users = service.store().load().await.unwrap();
        assert_eq!(users.get(&alice()), Some(original_hash.as_str()));

        // 3. login
        let mut session = Session::Anonymous;
        let outcome = service.login(&mut session, "alice", "pw1").await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "Signed in.");
        assert_eq!(session, Session::Authenticated(alice()));

        // 4. wrong password, from the signed-in session
        let outcome = service.login(&mut session, "alice", "wrong").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.rejection, Some(Rejection::InvalidCredentials));
        assert_eq!(outcome.session_user_name.as_deref(), Some("alice"));
        assert_eq!(session, Session::Authenticated(alice()));

        let mut fresh = Session::Anonymous;
        let outcome = service.login(&mut fresh, "alice", "wrong").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(fresh, Session::Anonymous);

        // 5. logout
        let outcome = service.logout(&mut session);
        assert!(outcome.success);
        assert_eq!(outcome.message, "Signed out.");
        assert_eq!(outcome.session_user_name, None);
        assert_eq!(session, Session::Anonymous);
    }

    #[tokio::test]
    async fn test_register_validation_leaves_store_untouched() {
        let service = memory_service();

        for (name, password) in [(" ", "pw"), ("bob", ""), ("", "")] {
            let mut session = Session::Anonymous;
            let outcome = service.register(&mut session, name, password).await.unwrap();
            assert!(!outcome.success);
            assert_eq!(outcome.rejection, Some(Rejection::Validation));
            assert_eq!(outcome.message, "Username and password are required.");
            assert_eq!(session, Session::Anonymous);
        }

        assert!(service.store().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_trims_user_name() {
        let service = memory_service();
        let mut session = Session::Anonymous;

        service.register(&mut session, "  alice  ", "pw1").await.unwrap();
        assert_eq!(session, Session::Authenticated(alice()));

        let mut session = Session::Anonymous;
        let outcome = service.login(&mut session, " alice", "pw1").await.unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn test_failed_register_keeps_existing_session() {
        let service = memory_service();
        let mut session = Session::Anonymous;
        service.register(&mut session, "alice", "pw1").await.unwrap();

        let outcome = service.register(&mut session, "alice", "pw2").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.session_user_name.as_deref(), Some("alice"));
        assert_eq!(session, Session::Authenticated(alice()));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let service = memory_service();
        let mut setup = Session::Anonymous;
        service.register(&mut setup, "alice", "pw1").await.unwrap();
        service.register(&mut setup, "bob", "pw2").await.unwrap();

        for (name, password) in [("alice", "wrong"), ("bob", "pw1"), ("nosuchuser", "pw1")] {
            let mut session = Session::Authenticated(alice());
            let outcome = service.login(&mut session, name, password).await.unwrap();

            assert!(!outcome.success);
            assert_eq!(outcome.rejection, Some(Rejection::InvalidCredentials));
            assert_eq!(outcome.session_user_name.as_deref(), Some("alice"));
            assert_eq!(session, Session::Authenticated(alice()));
        }
    }

    #[tokio::test]
    async fn test_login_does_not_reveal_which_half_was_wrong() {
        let service = memory_service();
        let mut session = Session::Anonymous;
        service.register(&mut session, "realuser", "secret").await.unwrap();

        let mut a = Session::Anonymous;
        let mut b = Session::Anonymous;
        let unknown = service.login(&mut a, "nosuchuser", "x").await.unwrap();
        let wrong = service.login(&mut b, "realuser", "wrong").await.unwrap();

        assert_eq!(unknown.rejection, wrong.rejection);
        assert_eq!(unknown.message, wrong.message);
        assert_eq!(unknown.message, "Invalid username or password.");
    }

    #[tokio::test]
    async fn test_login_empty_fields_are_invalid_credentials() {
        let service = memory_service();
        let mut session = Session::Anonymous;
        service.register(&mut session, "alice", "pw1").await.unwrap();

        for (name, password) in [("alice", ""), ("", "pw1"), ("  ", "")] {
            let mut s = Session::Anonymous;
            let outcome = service.login(&mut s, name, password).await.unwrap();
            assert_eq!(outcome.rejection, Some(Rejection::InvalidCredentials));
            assert_eq!(s, Session::Anonymous);
        }
    }

    #[tokio::test]
    async fn test_login_with_corrupt_stored_hash_is_rejected() {
        use crate::domain::entity::user_table::UserTable;

        let users: UserTable = [("alice".to_string(), "not-a-phc-string".to_string())]
            .into_iter()
            .collect();
        let service =
            AuthService::new(InMemoryCredentialStore::with_users(users), AuthConfig::development());

        let mut session = Session::Anonymous;
        let outcome = service
            .login(&mut session, "alice", "not-a-phc-string")
            .await
            .unwrap();
        assert_eq!(outcome.rejection, Some(Rejection::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_bad_store_entry_does_not_cost_other_accounts() {
        let dir = TempDir::new().unwrap();
        let service = file_service(&dir);
        let mut session = Session::Anonymous;
        service.register(&mut session, "alice", "pw1").await.unwrap();

        // Hand-edited file with one entry that is not a hash string
        let path = service.store().path().to_path_buf();
        let mut doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        doc["users"]["legacy"] = serde_json::json!(7);
        std::fs::write(&path, doc.to_string()).unwrap();

        let users = service.store().load().await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(users.contains(&alice()));

        let mut session = Session::Anonymous;
        let outcome = service.login(&mut session, "alice", "pw1").await.unwrap();
        assert!(outcome.success);

        let mut session = Session::Anonymous;
        let outcome = service.register(&mut session, "bob", "pw2").await.unwrap();
        assert!(outcome.success);

        let users = service.store().load().await.unwrap();
        assert!(users.contains(&alice()));
        assert!(users.contains(&UserName::new("bob").unwrap()));

        let mut session = Session::Anonymous;
        let outcome = service.login(&mut session, "alice", "pw1").await.unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn test_pepper_must_match() {
        let store = InMemoryCredentialStore::new();
        let peppered = AuthConfig {
            password_pepper: Some(b"pepper-1".to_vec()),
            ..AuthConfig::development()
        };
        let service = AuthService::new(store, peppered);
        let mut session = Session::Anonymous;
        service.register(&mut session, "alice", "pw1").await.unwrap();

        let users = service.store().load().await.unwrap();
        let other = AuthService::new(
            InMemoryCredentialStore::with_users(users),
            AuthConfig {
                password_pepper: Some(b"pepper-2".to_vec()),
                ..AuthConfig::development()
            },
        );
        let mut session = Session::Anonymous;
        let outcome = other.login(&mut session, "alice", "pw1").await.unwrap();
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn test_same_password_hashes_differ() {
        let service = memory_service();
        let mut s = Session::Anonymous;
        service.register(&mut s, "alice", "same").await.unwrap();
        service.register(&mut s, "bob", "same").await.unwrap();

        let users = service.store().load().await.unwrap();
        let a = users.get(&alice()).unwrap();
        let b = users.get(&UserName::new("bob").unwrap()).unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("same"));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let service = memory_service();
        let mut session = Session::Anonymous;

        let first = service.logout(&mut session);
        let second = service.logout(&mut session);
        assert_eq!(first, second);
        assert_eq!(session, Session::Anonymous);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_all_persist() {
        let dir = TempDir::new().unwrap();
        let service = file_service(&dir);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    let mut session = Session::Anonymous;
                    service
                        .register(&mut session, &format!("user{i}"), "pw")
                        .await
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().success);
        }

        let users = service.store().load().await.unwrap();
        assert_eq!(users.len(), 8);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_name_registers_once() {
        let dir = TempDir::new().unwrap();
        let service = file_service(&dir);

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    let mut session = Session::Anonymous;
                    service
                        .register(&mut session, "alice", &format!("pw{i}"))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            let outcome = handle.await.unwrap();
            if outcome.success {
                successes += 1;
            } else {
                assert_eq!(outcome.rejection, Some(Rejection::DuplicateUser));
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(service.store().load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_io_failure_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let service = AuthService::new(
            JsonFileCredentialStore::new(dir.path()),
            AuthConfig::development(),
        );

        let mut session = Session::Anonymous;
        let err = service
            .register(&mut session, "alice", "pw1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreIo { .. }));
        assert_eq!(session, Session::Anonymous);

        let err = service.login(&mut session, "alice", "pw1").await.unwrap_err();
        assert!(matches!(err, AuthError::StoreIo { .. }));
    }
}
