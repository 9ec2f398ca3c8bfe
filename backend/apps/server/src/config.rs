//! Server Configuration
//!
//! Read from the process environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use auth::AuthConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_USERS_FILE: &str = "users.json";

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub users_file: PathBuf,
    pub secret_key: Option<String>,
    pub password_pepper: Option<String>,
    pub cookie_secure: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?,
            None => DEFAULT_PORT,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(value) => parse_bool(&value)
                .with_context(|| format!("COOKIE_SECURE must be true or false, got {value:?}"))?,
            None => false,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            users_file: get("USERS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE)),
            secret_key: get("SECRET_KEY"),
            password_pepper: get("PASSWORD_PEPPER"),
            cookie_secure,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    /// Auth settings; without `SECRET_KEY` only debug builds may start
    pub fn auth_config(&self, allow_random_secret: bool) -> anyhow::Result<AuthConfig> {
        let base = match &self.secret_key {
            Some(secret) => AuthConfig::default().with_secret_key(secret),
            None if allow_random_secret => {
                tracing::warn!("SECRET_KEY not set, using a random key; sessions end on restart");
                AuthConfig::with_random_secret()
            }
            None => anyhow::bail!("SECRET_KEY must be set in production"),
        };

        Ok(AuthConfig {
            users_file: self.users_file.clone(),
            cookie_secure: self.cookie_secure,
            password_pepper: self
                .password_pepper
                .as_ref()
                .map(|pepper| pepper.as_bytes().to_vec()),
            ..base
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
