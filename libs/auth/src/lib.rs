//! Authentication for the moviedeck client
//!
//! Login and registration calls, client-side validation of the auth forms,
//! persistence of the session in durable or session-scoped storage, and the
//! guard that keeps protected views behind a stored session.

pub mod client;
pub mod guard;
pub mod models;
pub mod session;
pub mod validation;

pub use client::AuthClient;
pub use guard::authorize_route;
pub use session::{SessionManager, SessionScope};
