//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod logout;
pub mod outcome;
pub mod register;
pub mod service;
pub mod session_token;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use outcome::{Outcome, Rejection};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use service::AuthService;
pub use session_token::SessionTokenCodec;
