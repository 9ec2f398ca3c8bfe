//! JSON File Credential Store
//!
//! Persists the whole user table as a single JSON document:
//!
//! ```json
//! {
//!   "users": {
//!     "alice": "$argon2id$v=19$m=19456,t=2,p=1$..."
//!   }
//! }
//! ```
//!
//! Writes go to a temporary file in the same directory, are flushed to disk,
//! and then renamed over the target, so readers see either the old or the new
//! snapshot and never a torn one.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::entity::user_table::UserTable;
use crate::domain::repository::CredentialStore;
use crate::error::{AuthError, AuthResult};

/// On-disk shape
#[derive(Serialize)]
struct SnapshotRef<'a> {
    users: &'a UserTable,
}

/// File-backed credential store
#[derive(Debug, Clone)]
pub struct JsonFileCredentialStore {
    path: PathBuf,
}

impl JsonFileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for JsonFileCredentialStore {
    async fn load(&self) -> AuthResult<UserTable> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "Credential store absent, starting empty"
                );
                return Ok(UserTable::new());
            }
            Err(e) => return Err(AuthError::store_io(&self.path, e)),
        };

        Ok(parse_snapshot(&bytes, &self.path))
    }

    async fn save(&self, users: &UserTable) -> AuthResult<()> {
        let body = serde_json::to_vec_pretty(&SnapshotRef { users })
            .map_err(|e| AuthError::Internal(format!("Failed to serialize user table: {e}")))?;

        write_atomic(&self.path, &body)
            .await
            .map_err(|e| AuthError::store_io(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            users = users.len(),
            "Credential store saved"
        );
        Ok(())
    }
}

/// Decode a snapshot, treating anything malformed as empty
///
/// Inside a well-formed `users` mapping only the offending entries are
/// dropped; the rest of the table survives.
fn parse_snapshot(bytes: &[u8], path: &Path) -> UserTable {
    let entries = match decode_users(bytes) {
        Ok(entries) => entries,
        Err(reason) => {
            tracing::warn!(
                path = %path.display(),
                reason = %reason,
                "Credential store is malformed, treating it as empty"
            );
            return UserTable::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(user_name, hash)| match hash {
            Value::String(hash) => Some((user_name, hash)),
            other => {
                tracing::warn!(
                    path = %path.display(),
                    user_name = %user_name,
                    found = %json_type(&other),
                    "Skipping credential entry whose hash is not a string"
                );
                None
            }
        })
        .collect()
}

/// The top level must be an object whose `users` member is an object.
fn decode_users(bytes: &[u8]) -> Result<Map<String, Value>, String> {
    let root: Value = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    let Value::Object(mut root) = root else {
        return Err("top level is not an object".to_string());
    };
    match root.remove("users") {
        Some(Value::Object(users)) => Ok(users),
        Some(other) => Err(format!("\"users\" is {}, not an object", json_type(&other))),
        None => Err("missing \"users\" member".to_string()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Write `contents` to `path` via temp file + rename
async fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "store path has no file name")
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tokio::fs::create_dir_all(dir).await?;

    // Same directory as the target so the rename never crosses filesystems.
    let tmp_path = dir.join(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        Uuid::new_v4().simple()
    ));

    let result = write_and_rename(&tmp_path, path, contents).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(&tmp_path).await;
    }
    result
}

async fn write_and_rename(tmp_path: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(tmp_path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(tmp_path, path).await
}
