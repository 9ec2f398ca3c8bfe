//! Domain Layer
//!
//! Contains entities, value objects, and the credential store trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{session::Session, user::User, user_table::UserTable};
pub use repository::CredentialStore;
