//! Session Entity
//!
//! Per-client authentication state. The session only remembers *which* user
//! name is signed in; it is a weak reference and the record may have been
//! removed from the store since. Persisting it (cookie, etc.) is up to the
//! caller.
//!
//! ```text
//! Anonymous --register/login ok--> Authenticated(name)
//! Authenticated --logout--> Anonymous
//! failed register/login: unchanged
//! ```

use crate::domain::value_object::user_name::UserName;

/// Request-scoped session slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(UserName),
}

impl Session {
    /// Restore a session from a transport value (e.g. a verified cookie)
    ///
    /// Anything that is not a valid user name restores as anonymous.
    pub fn from_user_name(value: Option<&str>) -> Self {
        value
            .and_then(|v| UserName::new(v).ok())
            .map_or(Session::Anonymous, Session::Authenticated)
    }

    pub fn user_name(&self) -> Option<&UserName> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(name) => Some(name),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Bind the session to `user_name`, replacing any previous user
    pub fn authenticate(&mut self, user_name: UserName) {
        *self = Session::Authenticated(user_name);
    }

    /// Back to anonymous. Idempotent.
    pub fn clear(&mut self) {
        *self = Session::Anonymous;
    }
}
