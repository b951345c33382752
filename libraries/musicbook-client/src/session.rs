//! Client-held session: the access token and where it is persisted.

use crate::error::Result;
use async_trait::async_trait;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// Persistent slot for the access token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the stored token, `None` if nothing is stored.
    async fn load(&self) -> Result<Option<String>>;

    /// Replace the stored token.
    async fn save(&self, token: &str) -> Result<()>;

    /// Erase the stored token. Erasing an empty slot succeeds.
    async fn remove(&self) -> Result<()>;
}

/// In-process store. Clones share the same slot, so a test can hold one
/// handle and tamper with the credential behind the session's back.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.slot.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        self.slot.lock().await.take();
        Ok(())
    }
}

/// Stores the token as the sole content of a single file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    const FILE_NAME: &'static str = "access_token";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/musicbook/access_token`, falling back to the temp dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("musicbook")
            .join(Self::FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token).await?;
        debug!(path = ?self.path, "Stored access token");
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = ?self.path, "Removed access token");
                Ok(())
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The authenticated-or-not state of this client.
///
/// Shared by the HTTP adapter (reads the token for every request), the
/// session guard (presence check) and login/logout (the only writers).
/// Presence of a token is the whole of the authentication state: nothing
/// here validates or refreshes it.
pub struct Session {
    token: RwLock<Option<String>>,
    store: Box<dyn CredentialStore>,
}

impl Session {
    /// A session that forgets its token when dropped.
    pub fn in_memory() -> Self {
        Self {
            token: RwLock::new(None),
            store: Box::new(MemoryCredentialStore::new()),
        }
    }

    /// Restore a session from a store.
    pub async fn load(store: impl CredentialStore + 'static) -> Result<Self> {
        let token = store.load().await?;
        debug!(authenticated = token.is_some(), "Loaded session");
        Ok(Self {
            token: RwLock::new(token),
            store: Box::new(store),
        })
    }

    /// Current token, if any.
    pub async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Persist and adopt a new token.
    pub async fn set(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.store.save(&token).await?;
        *self.token.write().await = Some(token);
        info!("Session started");
        Ok(())
    }

    /// Drop the token from memory and from the store. Idempotent.
    pub async fn clear(&self) -> Result<()> {
        self.token.write().await.take();
        self.store.remove().await?;
        info!("Session cleared");
        Ok(())
    }

    /// Re-read the store so a credential removed (or written) externally is
    /// observed. Returns whether a token is present afterwards.
    pub async fn sync(&self) -> Result<bool> {
        let stored = self.store.load().await?;
        let present = stored.is_some();
        *self.token.write().await = stored;
        Ok(present)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself.
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
