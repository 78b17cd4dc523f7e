//! Client view routes and navigation

use std::fmt;
use std::sync::Mutex;

use tracing::info;

/// Views the client can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Register,
    Movies,
    CreateMovie,
    EditMovie(String),
}

impl Route {
    /// Parse a view path, ignoring any query string and trailing slash
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] => Some(Route::Root),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["movies"] => Some(Route::Movies),
            ["movies", "create"] => Some(Route::CreateMovie),
            ["movies", id, "edit"] if !id.is_empty() => Some(Route::EditMovie(id.to_string())),
            _ => None,
        }
    }

    /// The path this route is served at
    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Movies => "/movies".to_string(),
            Route::CreateMovie => "/movies/create".to_string(),
            Route::EditMovie(id) => format!("/movies/{}/edit", id),
        }
    }

    /// Whether the route needs a stored session
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Movies | Route::CreateMovie | Route::EditMovie(_)
        )
    }

    /// Whether the route is only for visitors without a session
    pub fn guest_only(&self) -> bool {
        matches!(self, Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Paths on which a 401 is a login failure rather than an expired session
pub fn is_login_path(path: &str) -> bool {
    matches!(Route::parse(path), Some(Route::Login) | Some(Route::Root))
}

/// Access to the current view and hard navigation
pub trait Navigator: Send + Sync {
    /// Path of the view currently shown
    fn current_path(&self) -> String;

    /// Replace the current view, discarding its state
    fn hard_navigate(&self, path: &str);
}

/// Navigator that only tracks the current path
#[derive(Debug)]
pub struct MemoryNavigator {
    current: Mutex<String>,
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(route: &Route) -> Self {
        Self {
            current: Mutex::new(route.path()),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Route currently shown, if the path is a known one
    pub fn current_route(&self) -> Option<Route> {
        Route::parse(&self.current_path())
    }

    /// Paths navigated to, in order
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.current
            .lock()
            .map(|current| current.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn hard_navigate(&self, path: &str) {
        info!("Navigating to {}", path);
        match self.current.lock() {
            Ok(mut current) => *current = path.to_string(),
            Err(poisoned) => *poisoned.into_inner() = path.to_string(),
        }
        if let Ok(mut history) = self.history.lock() {
            history.push(path.to_string());
        }
    }
}
