//! Client wiring shared by every command.

use std::sync::Arc;

use anyhow::Result;
use auth::{AuthClient, SessionManager, authorize_route};
use common::{ClientConfig, FileStore, HttpClient, MemoryNavigator, Route};
use movies::{MovieClient, MovieEditor};
use tracing::debug;
use upload::UploadClient;

/// Clients for one command invocation, all sharing one session and view
pub struct App {
    pub config: ClientConfig,
    pub sessions: Arc<SessionManager>,
    pub navigator: Arc<MemoryNavigator>,
    pub auth: AuthClient,
    pub movies: MovieClient,
    pub uploads: UploadClient,
    pub editor: MovieEditor,
}

impl App {
    /// Build the clients with the view for `route` as the current one
    pub fn new(config: ClientConfig, route: &Route) -> Result<Self> {
        let durable = Arc::new(FileStore::new(config.durable_storage_path()));
        let session = Arc::new(FileStore::new(config.session_storage_path()));
        debug!(
            "Using durable storage {} and session storage {}",
            durable.path().display(),
            session.path().display()
        );

        let sessions = Arc::new(SessionManager::new(durable, session));
        let navigator = Arc::new(MemoryNavigator::new(route));

        let api = HttpClient::new(&config, sessions.clone(), navigator.clone())?;
        let upload_api =
            HttpClient::with_base_url(&config.upload_url, &config, sessions.clone(), navigator.clone())?;

        let movies = MovieClient::new(api.clone());
        let uploads = UploadClient::new(upload_api, config.max_upload_bytes);

        Ok(Self {
            auth: AuthClient::new(api, sessions.clone()),
            editor: MovieEditor::new(movies.clone(), uploads.clone()),
            movies,
            uploads,
            sessions,
            navigator,
            config,
        })
    }

    /// Route actually shown when `route` is requested
    pub fn authorize(&self, route: &Route) -> Route {
        authorize_route(&self.sessions, self.navigator.as_ref(), route.clone())
    }

    /// Whether the current view was replaced by the login view
    pub fn redirected_to_login(&self, requested: &Route) -> bool {
        *requested != Route::Login && self.navigator.current_route() == Some(Route::Login)
    }
}
