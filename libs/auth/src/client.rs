//! Login, registration and logout against the users API

use std::sync::Arc;

use common::{ClientResult, HttpClient, Navigator, Route};
use tracing::{error, info};

use crate::{
    models::{LoginCredentials, LoginResponse, RegisterForm, RegisterResponse, Session},
    session::{SessionManager, SessionScope},
    validation::{validate_login, validate_registration},
};

/// Authentication client
#[derive(Clone)]
pub struct AuthClient {
    http: HttpClient,
    sessions: Arc<SessionManager>,
}

impl AuthClient {
    /// Create a new authentication client
    pub fn new(http: HttpClient, sessions: Arc<SessionManager>) -> Self {
        Self { http, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Log in and persist the session
    ///
    /// With `remember` the session goes to durable storage, otherwise to
    /// session storage. The other storage is cleared first.
    pub async fn login(&self, identifier: &str, password: &str, remember: bool) -> ClientResult<Session> {
        validate_login(identifier, password)?;

        let credentials = LoginCredentials::new(identifier, password);
        info!("Login attempt for user: {}", credentials.identifier());

        let response: LoginResponse = self
            .http
            .post("/users/login", &credentials, &["accessToken"])
            .await
            .inspect_err(|e| error!("Login failed: {}", e))?;

        let session = Session::from(response);
        self.sessions
            .persist(&session, SessionScope::from_remember(remember))?;

        info!("User {} logged in", session.user.id);
        Ok(session)
    }

    /// Register a new account and go to the login view
    ///
    /// The form is validated in full before any request is sent.
    pub async fn register(&self, form: &RegisterForm) -> ClientResult<RegisterResponse> {
        let new_user = validate_registration(form)?;
        info!("Registering user: {}", new_user.email);

        let response: RegisterResponse = self
            .http
            .post("/users/register", &new_user, &["user", "message", "accessToken"])
            .await
            .inspect_err(|e| error!("Registration failed: {}", e))?;

        info!("Registered user: {}", new_user.email);
        self.http.navigator().hard_navigate(&Route::Login.path());
        Ok(response)
    }

    /// Forget the stored session and go back to the login view
    pub fn logout(&self) -> ClientResult<()> {
        info!("Logging out");
        self.sessions.clear()?;
        self.http.navigator().hard_navigate(&Route::Login.path());
        Ok(())
    }
}
