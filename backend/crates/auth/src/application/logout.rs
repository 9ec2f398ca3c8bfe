//! Logout Use Case
//!
//! Clears the caller's session. Never touches the store, never fails.

use crate::domain::entity::session::Session;

/// Logout use case
#[derive(Debug, Default, Clone, Copy)]
pub struct LogoutUseCase;

impl LogoutUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, session: &mut Session) {
        if let Some(user_name) = session.user_name() {
            tracing::info!(user_name = %user_name, "User signed out");
        }
        session.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_name::UserName;

    #[test]
    fn test_logout_clears_session() {
        let mut session = Session::Authenticated(UserName::new("alice").unwrap());
        LogoutUseCase::new().execute(&mut session);
        assert_eq!(session, Session::Anonymous);
    }

    #[test]
    fn test_logout_without_session_is_noop() {
        let mut session = Session::Anonymous;
        LogoutUseCase::new().execute(&mut session);
        assert_eq!(session, Session::Anonymous);
    }
}
