//! Credential-presence gate in front of protected routes.

use crate::route::Route;
use musicbook_client::Session;
use std::sync::Arc;
use tracing::debug;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the requested route (inside the chrome when protected)
    Render(Route),
    /// Show this route instead
    Redirect(Route),
}

impl GuardDecision {
    /// The route that ends up on screen.
    pub fn route(&self) -> &Route {
        match self {
            GuardDecision::Render(route) | GuardDecision::Redirect(route) => route,
        }
    }
}

/// Lets protected routes through only while a token is present.
///
/// Presence is the whole check; an expired or revoked token passes here
/// and only fails at the next API call.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    session: Arc<Session>,
}

impl SessionGuard {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    pub async fn check(&self, route: Route) -> GuardDecision {
        if route.is_protected() && !self.session.is_authenticated().await {
            debug!(requested = %route, "No credential, redirecting to login");
            GuardDecision::Redirect(Route::Login)
        } else {
            GuardDecision::Render(route)
        }
    }
}
