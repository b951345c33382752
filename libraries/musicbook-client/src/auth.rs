//! Token endpoint.

use crate::client::MusicBookClient;
use crate::error::Result;
use crate::types::{TokenPair, TokenRequest};
use tracing::debug;

/// Authentication calls. Obtaining a token does not touch the session;
/// [`MusicBookClient::login`] does that.
pub struct AuthClient<'a> {
    client: &'a MusicBookClient,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(client: &'a MusicBookClient) -> Self {
        Self { client }
    }

    /// Exchange a username and password for an access token.
    pub async fn obtain_token(&self, username: &str, password: &str) -> Result<TokenPair> {
        debug!(username = %username, "Requesting access token");

        let request = TokenRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        self.client.post("/token/", &request).await
    }
}
