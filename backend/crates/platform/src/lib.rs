//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, URL-safe Base64)
//! - Password hashing (Argon2id with per-call salt and optional pepper)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
