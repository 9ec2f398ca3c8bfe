//! HTTP Handlers

use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;

use platform::cookie::{CookieConfig, extract_cookie};

use crate::application::outcome::Outcome;
use crate::application::{AuthService, SessionTokenCodec};
use crate::domain::entity::session::Session;
use crate::domain::repository::CredentialStore;
use crate::error::AuthResult;
use crate::presentation::dto::{CredentialsForm, OutcomeResponse, SessionStatusResponse};

/// Shared state for auth handlers
pub struct AuthAppState<S>
where
    S: CredentialStore,
{
    pub service: AuthService<S>,
    pub tokens: SessionTokenCodec,
    pub cookie: CookieConfig,
}

impl<S> Clone for AuthAppState<S>
where
    S: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            tokens: self.tokens.clone(),
            cookie: self.cookie.clone(),
        }
    }
}

impl<S> AuthAppState<S>
where
    S: CredentialStore,
{
    pub fn new(service: AuthService<S>) -> Self {
        let tokens = SessionTokenCodec::from_config(service.config());
        let cookie = service.config().session_cookie();
        Self {
            service,
            tokens,
            cookie,
        }
    }

    fn session(&self, headers: &HeaderMap) -> Session {
        let token = extract_cookie(headers, &self.cookie.name);
        self.tokens.decode(token.as_deref())
    }

    /// Render an outcome; a successful one also rewrites the session cookie
    fn respond(&self, outcome: Outcome, session: &Session) -> Response {
        let status = outcome
            .rejection
            .and_then(|r| StatusCode::from_u16(r.kind().status_code()).ok())
            .unwrap_or(StatusCode::OK);

        if !outcome.success {
            return (status, Json(OutcomeResponse::from(outcome))).into_response();
        }

        let cookie = match self.tokens.issue(session) {
            Some(token) => self.cookie.build_set_cookie(&token),
            None => self.cookie.build_delete_cookie(),
        };

        (
            status,
            [(header::SET_COOKIE, cookie)],
            Json(OutcomeResponse::from(outcome)),
        )
            .into_response()
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<S>(
    State(state): State<AuthAppState<S>>,
    headers: HeaderMap,
    Form(form): Form<CredentialsForm>,
) -> AuthResult<Response>
where
    S: CredentialStore + Sync + 'static,
{
    let mut session = state.session(&headers);
    let outcome = state
        .service
        .register(&mut session, &form.username, &form.password)
        .await?;

    Ok(state.respond(outcome, &session))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<S>(
    State(state): State<AuthAppState<S>>,
    headers: HeaderMap,
    Form(form): Form<CredentialsForm>,
) -> AuthResult<Response>
where
    S: CredentialStore + Sync + 'static,
{
    let mut session = state.session(&headers);
    let outcome = state
        .service
        .login(&mut session, &form.username, &form.password)
        .await?;

    Ok(state.respond(outcome, &session))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /logout
pub async fn logout<S>(State(state): State<AuthAppState<S>>, headers: HeaderMap) -> Response
where
    S: CredentialStore + Sync + 'static,
{
    let mut session = state.session(&headers);
    let outcome = state.service.logout(&mut session);

    state.respond(outcome, &session)
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /session
pub async fn session_status<S>(
    State(state): State<AuthAppState<S>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    S: CredentialStore + Sync + 'static,
{
    let session = state.session(&headers);

    Json(SessionStatusResponse {
        authenticated: session.is_authenticated(),
        user_name: session.user_name().map(|name| name.to_string()),
    })
}
