//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::outcome::{Outcome, Rejection};

// ============================================================================
// Register / Login
// ============================================================================

/// Form body shared by register and login
///
/// Missing fields read as empty and are rejected by the use case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response for register, login and logout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeResponse {
    pub success: bool,
    pub message: String,
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

impl From<Outcome> for OutcomeResponse {
    fn from(outcome: Outcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            user_name: outcome.session_user_name,
            rejection: outcome.rejection,
        }
    }
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user_name: Option<String>,
}
