//! Login screen.

use crate::route::Route;
use musicbook_client::{ClientError, MusicBookClient};
use tracing::warn;

/// Shown for every failed attempt; the cause is only logged.
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Username/password form.
#[derive(Debug, Default)]
pub struct LoginScreen {
    pub username: String,
    pub password: String,
    error: Option<&'static str>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Exchange the form's credentials for a token.
    ///
    /// On success the token is already in the session and the returned route
    /// is where to go next. On failure nothing is stored and the static
    /// failure message is shown.
    pub async fn submit(&mut self, client: &MusicBookClient) -> Result<Route, ClientError> {
        self.error = None;

        match client.login(&self.username, &self.password).await {
            Ok(_) => Ok(Route::Home),
            Err(e) => {
                warn!(error = %e, username = %self.username, "Login failed");
                self.error = Some(LOGIN_FAILED);
                Err(e)
            }
        }
    }
}
