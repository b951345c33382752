//! Catalog lookups proxied by the backend to the external music catalog.

use crate::client::MusicBookClient;
use crate::error::Result;
use crate::types::{AlbumSummary, AlbumWithReviews, AlbumsEnvelope, Page};
use tracing::debug;

/// Catalog search and album lookups.
pub struct CatalogClient<'a> {
    client: &'a MusicBookClient,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(client: &'a MusicBookClient) -> Self {
        Self { client }
    }

    /// Search albums by free text. The query is sent as-is, even when empty.
    pub async fn search_albums(&self, query: &str) -> Result<Vec<AlbumSummary>> {
        let envelope: AlbumsEnvelope = self
            .client
            .get("/spotify/search/", &[("q", query), ("type", "album")])
            .await?;

        debug!(query = %query, results = envelope.albums.items.len(), "Search complete");
        Ok(envelope.albums.items)
    }

    /// Album metadata plus the community reviews stored for it.
    pub async fn album_details(&self, album_id: &str) -> Result<AlbumWithReviews> {
        let details: AlbumWithReviews = self
            .client
            .get(&format!("/album-details/{}/", album_id), &[])
            .await?;

        debug!(
            album_id = %album_id,
            reviews = details.local_reviews.len(),
            "Fetched album details"
        );
        Ok(details)
    }

    /// Latest releases featured by the catalog.
    pub async fn new_releases(&self) -> Result<Vec<AlbumSummary>> {
        let envelope: AlbumsEnvelope = self
            .client
            .get("/spotify/browse/new-releases/", &[])
            .await?;

        debug!(results = envelope.albums.items.len(), "Fetched new releases");
        Ok(envelope.albums.items)
    }

    /// Albums by one artist.
    pub async fn artist_albums(&self, artist_id: &str) -> Result<Vec<AlbumSummary>> {
        let page: Page<AlbumSummary> = self
            .client
            .get(&format!("/spotify/artists/{}/albums/", artist_id), &[])
            .await?;

        debug!(artist_id = %artist_id, results = page.items.len(), "Fetched artist albums");
        Ok(page.items)
    }
}
