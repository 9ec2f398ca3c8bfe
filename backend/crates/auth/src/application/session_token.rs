//! Session Token
//!
//! Signed, expiring encoding of a [`Session`] for the cookie transport.
//!
//! ```text
//! base64url("<expires_at_unix>:<user_name>") "." base64url(HMAC-SHA256(secret, payload))
//! ```
//!
//! Anything that fails to decode, fails the signature check or has expired
//! restores as `Session::Anonymous`.

use chrono::{DateTime, Duration, Utc};
use platform::crypto;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionTokenCodec {
    secret: [u8; 32],
    ttl: Duration,
}

impl SessionTokenCodec {
    pub fn new(secret: [u8; 32], ttl: std::time::Duration) -> Self {
        Self {
            secret,
            ttl: Duration::from_std(ttl).unwrap_or(Duration::days(31)),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.session_secret, config.session_ttl)
    }

    /// Token for an authenticated session; `None` for an anonymous one
    pub fn issue(&self, session: &Session) -> Option<String> {
        self.issue_at(session, Utc::now())
    }

    pub fn issue_at(&self, session: &Session, now: DateTime<Utc>) -> Option<String> {
        let user_name = session.user_name()?;
        let expires_at = (now + self.ttl).timestamp();
        let payload = format!("{expires_at}:{user_name}");
        let tag = crypto::hmac_sha256(&self.secret, payload.as_bytes());

        Some(format!(
            "{}.{}",
            crypto::to_base64url(payload.as_bytes()),
            crypto::to_base64url(&tag)
        ))
    }

    pub fn decode(&self, token: Option<&str>) -> Session {
        self.decode_at(token, Utc::now())
    }

    pub fn decode_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Session {
        match token.and_then(|t| self.verify(t, now)) {
            Some(user_name) => Session::from_user_name(Some(&user_name)),
            None => Session::Anonymous,
        }
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
        let (payload_b64, tag_b64) = token.split_once('.')?;
        let payload = crypto::from_base64url(payload_b64).ok()?;
        let tag = crypto::from_base64url(tag_b64).ok()?;

        if !crypto::verify_hmac_sha256(&self.secret, &payload, &tag) {
            tracing::debug!("Session token signature mismatch");
            return None;
        }

        let payload = String::from_utf8(payload).ok()?;
        let (expires_at, user_name) = payload.split_once(':')?;
        let expires_at: i64 = expires_at.parse().ok()?;

        if expires_at <= now.timestamp() {
            tracing::debug!(user_name = %user_name, "Session token expired");
            return None;
        }

        Some(user_name.to_string())
    }
}
