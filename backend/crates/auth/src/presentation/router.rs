//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::{AuthConfig, AuthService};
use crate::domain::repository::CredentialStore;
use crate::infra::JsonFileCredentialStore;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router backed by the JSON file named in `config`
pub fn auth_router(config: AuthConfig) -> Router {
    let store = JsonFileCredentialStore::new(config.users_file.clone());
    auth_router_generic(AuthService::new(store, config))
}

/// Create a generic Auth router for any store implementation
pub fn auth_router_generic<S>(service: AuthService<S>) -> Router
where
    S: CredentialStore + Sync + 'static,
{
    let state = AuthAppState::new(service);

    Router::new()
        .route("/register", post(handlers::register::<S>))
        .route("/login", post(handlers::login::<S>))
        .route("/logout", post(handlers::logout::<S>))
        .route("/session", get(handlers::session_status::<S>))
        .with_state(state)
}
