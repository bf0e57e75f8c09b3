//! Application Layer
//!
//! Use cases and application services.

pub mod admin;
pub mod check_session;
pub mod config;
pub mod login;
pub mod logout;
pub mod password_reset;
pub mod register;
pub mod session_token;

// Re-exports
pub use admin::{ListUsersUseCase, PromoteUseCase, SetAccessUseCase};
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use login::{Identity, LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use password_reset::{
    CompleteResetInput, CompleteResetUseCase, RequestResetUseCase, ResetGrant,
};
pub use register::{RegisterInput, RegisterUseCase};
