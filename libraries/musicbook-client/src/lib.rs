//! Music Book Client
//!
//! HTTP client library for the Music Book review API.
//!
//! # Features
//!
//! - **Session**: explicit token holder with pluggable persistence
//! - **Authentication**: exchange username/password for an access token
//! - **Catalog**: album search, album detail with community reviews
//! - **Reviews**: submit a review, list your own reviews
//!
//! # Example
//!
//! ```ignore
//! use musicbook_client::{ClientConfig, FileCredentialStore, MusicBookClient, NewReview, Rating, Session};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(Session::load(FileCredentialStore::default()).await?);
//!     let client = MusicBookClient::new(ClientConfig::new("http://127.0.0.1:8000/api"), session)?;
//!
//!     client.login("alice", "secret").await?;
//!
//!     let albums = client.catalog().search_albums("Abbey Road").await?;
//!     let review = NewReview {
//!         spotify_album_id: albums[0].id.clone(),
//!         rating: Rating::default(),
//!         comment: "Great record".into(),
//!     };
//!     client.reviews().create(&review).await?;
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod catalog;
mod client;
mod error;
mod reviews;
mod session;
mod types;

pub use client::MusicBookClient;
pub use error::{ClientError, ErrorKind, Result};
pub use session::{CredentialStore, FileCredentialStore, MemoryCredentialStore, Session};
pub use types::{
    AlbumDetails, AlbumSummary, AlbumWithReviews, ArtistRef, ClientConfig, Image, NewReview,
    Rating, Review, ReviewAlbum, TokenPair,
};

// Sub-clients for direct use if needed
pub use auth::AuthClient;
pub use catalog::CatalogClient;
pub use reviews::ReviewsClient;
