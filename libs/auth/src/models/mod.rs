//! Authentication models

pub mod session;
pub mod user;

// Re-export for convenience
pub use session::{LoginResponse, Session};
pub use user::{LoginCredentials, NewUser, RegisterForm, RegisterResponse, User};
