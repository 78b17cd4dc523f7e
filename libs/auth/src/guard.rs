//! Route guard for views that need a stored session

use common::{Navigator, Route};
use tracing::info;

use crate::session::SessionManager;

/// Resolve the route actually shown when `route` is requested
///
/// Protected routes without a stored token redirect to the login view;
/// guest-only routes with a stored token redirect to the movie list.
pub fn authorize_route(sessions: &SessionManager, navigator: &dyn Navigator, route: Route) -> Route {
    let authenticated = sessions.is_authenticated();

    if route.requires_auth() && !authenticated {
        info!("No session for {}, redirecting to login", route);
        navigator.hard_navigate(&Route::Login.path());
        return Route::Login;
    }

    if route.guest_only() && authenticated {
        info!("Already logged in, redirecting {} to the movie list", route);
        navigator.hard_navigate(&Route::Movies.path());
        return Route::Movies;
    }

    route
}
