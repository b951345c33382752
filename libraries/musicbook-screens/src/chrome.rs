//! Navigation chrome shown around every protected screen.

use crate::route::Route;
use musicbook_client::Session;
use std::sync::Arc;
use tracing::{info, warn};

/// A persistent navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

/// Links plus the logout control.
#[derive(Debug, Clone)]
pub struct Chrome {
    session: Arc<Session>,
}

impl Chrome {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    pub fn links(&self) -> [NavLink; 2] {
        [
            NavLink {
                label: "Home (Search)",
                route: Route::Home,
            },
            NavLink {
                label: "My Reviews",
                route: Route::MyReviews,
            },
        ]
    }

    /// Forget the credential and return the route to show next.
    ///
    /// Purely local: the backend is not told. A store that cannot be
    /// cleared is logged; the in-memory token is gone either way.
    pub async fn logout(&self) -> Route {
        if let Err(e) = self.session.clear().await {
            warn!(error = %e, "Failed to erase stored credential");
        }
        info!("Logged out");
        Route::Login
    }
}
