//! Operation Outcome
//!
//! What the boundary gets back from every auth operation: success flag,
//! user-facing message, and the session value to persist.

use kernel::error::kind::ErrorKind;
use serde::Serialize;

use crate::domain::entity::session::Session;

pub const REGISTERED_MESSAGE: &str = "Account created.";
pub const SIGNED_IN_MESSAGE: &str = "Signed in.";
pub const SIGNED_OUT_MESSAGE: &str = "Signed out.";

/// Why an operation was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Empty user name or password on register
    Validation,
    /// User name already registered
    DuplicateUser,
    /// Unknown user or wrong password
    InvalidCredentials,
}

impl Rejection {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Rejection::Validation => ErrorKind::BadRequest,
            Rejection::DuplicateUser => ErrorKind::Conflict,
            Rejection::InvalidCredentials => ErrorKind::Unauthorized,
        }
    }
}

/// Result of a register/login/logout call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    /// Session value after the call; `None` means anonymous
    pub session_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

impl Outcome {
    pub fn success(message: &str, session: &Session) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            session_user_name: session_value(session),
            rejection: None,
        }
    }

    pub fn rejected(rejection: Rejection, message: String, session: &Session) -> Self {
        Self {
            success: false,
            message,
            session_user_name: session_value(session),
            rejection: Some(rejection),
        }
    }
}

fn session_value(session: &Session) -> Option<String> {
    session.user_name().map(|name| name.as_str().to_string())
}
