//! Main Music Book API client.

use crate::auth::AuthClient;
use crate::catalog::CatalogClient;
use crate::error::{ClientError, Result};
use crate::reviews::ReviewsClient;
use crate::session::Session;
use crate::types::{ClientConfig, TokenPair};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP adapter for the Music Book backend.
///
/// Every request reads the token from the shared [`Session`] just before
/// dispatch and, when one is present, sends it as a bearer credential.
/// Failures come back as [`ClientError`] without retries.
///
/// # Example
///
/// ```ignore
/// use musicbook_client::{ClientConfig, MusicBookClient, Session};
/// use std::sync::Arc;
///
/// let session = Arc::new(Session::in_memory());
/// let client = MusicBookClient::new(ClientConfig::new("http://127.0.0.1:8000/api"), session)?;
///
/// client.login("alice", "secret").await?;
/// let albums = client.catalog().search_albums("Abbey Road").await?;
/// println!("Found {} albums", albums.len());
/// ```
#[derive(Debug, Clone)]
pub struct MusicBookClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl MusicBookClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig, session: Arc<Session>) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MusicBook/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session this client reads its credential from.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Exchange credentials for a token and store it in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let tokens = self.auth().obtain_token(username, password).await?;
        self.session.set(tokens.access.clone()).await?;
        info!(username = %username, "Login successful");
        Ok(tokens)
    }

    /// Forget the stored token. The backend is not told.
    pub async fn logout(&self) -> Result<()> {
        self.session.clear().await
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self)
    }

    pub fn catalog(&self) -> CatalogClient<'_> {
        CatalogClient::new(self)
    }

    pub fn reviews(&self) -> ReviewsClient<'_> {
        ReviewsClient::new(self)
    }

    /// GET `path` (relative to the base URL) with the given query pairs.
    pub async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(request, &url).await
    }

    /// POST a JSON body to `path` (relative to the base URL).
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let request = self.http.post(&url).json(body);
        self.send(request, &url).await
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn send<T>(&self, request: RequestBuilder, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = match self.session.get().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(ClientError::from_transport)?;
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                ClientError::Parse(format!("Failed to parse response from {}: {}", url, e))
            })
        } else {
            let message = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "Request rejected");
            Err(ClientError::from_status(status.as_u16(), message))
        }
    }
}
