//! Navigable paths.

use std::fmt;

/// A screen address.
///
/// Paths that match nothing resolve to [`Route::Login`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    Login,
    /// `/home`, the album search
    Home,
    /// `/album/:id`
    Album(String),
    /// `/my-reviews`
    MyReviews,
}

impl Route {
    /// Resolve a path. Query strings, fragments and a trailing slash are
    /// ignored.
    pub fn resolve(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Route::Login,
            ["home"] => Route::Home,
            ["album", id] => Route::Album((*id).to_string()),
            ["my-reviews"] => Route::MyReviews,
            _ => Route::Login,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Home => "/home".to_string(),
            Route::Album(id) => format!("/album/{}", id),
            Route::MyReviews => "/my-reviews".to_string(),
        }
    }

    /// Whether the route needs a credential.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
