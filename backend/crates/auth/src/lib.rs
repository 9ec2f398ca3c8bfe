//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, credential store trait
//! - `application/` - Use cases, `AuthService`, session token
//! - `infra/` - JSON file and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Register / login / logout with username + password
//! - Credentials persisted as one JSON document (`{"users": {...}}`)
//! - Sessions carried in an HMAC-signed, expiring cookie
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, random salt per hash, optional pepper
//! - One rejection message for unknown user and wrong password
//! - Store writes are atomic (temp file + rename) and serialized in-process

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, AuthService, Outcome, Rejection};
pub use domain::{CredentialStore, Session};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryCredentialStore, JsonFileCredentialStore};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
