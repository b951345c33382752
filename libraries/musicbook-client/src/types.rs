//! Types for Music Book API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Configuration for connecting to a Music Book backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://127.0.0.1:8000/api")
    pub base_url: String,
    /// Total request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the token endpoint.
#[derive(Debug, Serialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    /// Issued by the backend but never used by this client
    #[serde(default)]
    pub refresh: Option<String>,
}

// =============================================================================
// Catalog Types
// =============================================================================

/// Artist reference embedded in catalog albums.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Cover image reference.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// An album as returned by a catalog search.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AlbumSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
}

impl AlbumSummary {
    /// Artist names joined for display.
    pub fn artist_names(&self) -> String {
        join_artists(&self.artists)
    }

    /// First (largest) cover image, if any.
    pub fn cover(&self) -> Option<&Image> {
        self.images.first()
    }
}

/// Full album metadata from the catalog provider.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AlbumDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
}

impl AlbumDetails {
    /// Artist names joined for display.
    pub fn artist_names(&self) -> String {
        join_artists(&self.artists)
    }

    /// First (largest) cover image, if any.
    pub fn cover(&self) -> Option<&Image> {
        self.images.first()
    }
}

/// Album metadata combined with the community reviews stored locally.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumWithReviews {
    pub spotify_details: AlbumDetails,
    #[serde(default)]
    pub local_reviews: Vec<Review>,
}

/// `{items: [...]}` page wrapper used by the catalog provider.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
}

/// `{albums: {items: [...]}}` wrapper used by search and new releases.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlbumsEnvelope {
    pub albums: Page<AlbumSummary>,
}

fn join_artists(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Review Types
// =============================================================================

/// Star rating accepted by the review form: one of 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// All selectable ratings, highest first (the form's option order).
    pub fn options() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).rev().map(Rating)
    }

    /// Create a rating, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating must be between 1 and 5, got {value}"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Album summary nested inside a stored review.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ReviewAlbum {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub spotify_id: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

/// A review as stored by the backend.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Review {
    pub id: i64,
    #[serde(default)]
    pub album: Option<ReviewAlbum>,
    /// Display name of the author
    pub user: String,
    /// Raw value from the server; not re-validated client-side
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Catalog id of the reviewed album, when the server included it.
    pub fn spotify_album_id(&self) -> Option<&str> {
        self.album.as_ref().and_then(|a| a.spotify_id.as_deref())
    }
}

/// Request body for creating a review.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewReview {
    pub spotify_album_id: String,
    pub rating: Rating,
    pub comment: String,
}
