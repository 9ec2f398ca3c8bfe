//! Infrastructure Layer
//!
//! Credential store implementations.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileCredentialStore;
pub use memory::InMemoryCredentialStore;
