//! Repository Traits
//!
//! Interface for credential persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::user_table::UserTable;
use crate::error::AuthResult;

/// Credential store trait
///
/// Whole-snapshot semantics: `load` returns every record, `save` replaces
/// every record. A reader never observes a partially written snapshot.
/// Serializing load-modify-save sequences is the caller's job.
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Read the current snapshot
    ///
    /// Missing or malformed persisted state yields an empty table.
    /// Only genuine I/O failures are errors.
    async fn load(&self) -> AuthResult<UserTable>;

    /// Replace the persisted snapshot with `users`
    async fn save(&self, users: &UserTable) -> AuthResult<()>;
}
