//! Album search (the home screen).

use crate::load::{RequestTracker, Ticket};
use crate::route::Route;
use musicbook_client::{AlbumSummary, ClientError, MusicBookClient};
use tracing::{debug, error};

pub const SEARCH_FAILED: &str = "Search failed. Please check the log for details.";

/// One clickable search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// "<album> by <artists>"
    pub label: String,
    pub route: Route,
}

/// Query box plus the current result list.
///
/// Results are replaced only by a successful response; a failure raises an
/// alert and leaves the previous list on screen.
#[derive(Debug, Default)]
pub struct SearchScreen {
    pub query: String,
    results: Vec<AlbumSummary>,
    alert: Option<&'static str>,
    tracker: RequestTracker,
}

impl SearchScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[AlbumSummary] {
        &self.results
    }

    pub fn rows(&self) -> Vec<ResultRow> {
        self.results
            .iter()
            .map(|album| ResultRow {
                label: format!("{} by {}", album.name, album.artist_names()),
                route: Route::Album(album.id.clone()),
            })
            .collect()
    }

    /// Pending alert, if any. Reading it dismisses it.
    pub fn take_alert(&mut self) -> Option<&'static str> {
        self.alert.take()
    }

    pub fn alert(&self) -> Option<&'static str> {
        self.alert
    }

    /// Start a request for the result list.
    pub fn begin(&mut self) -> Ticket {
        self.alert = None;
        self.tracker.begin()
    }

    /// Apply a result list response. Stale responses are dropped.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<AlbumSummary>, ClientError>,
    ) -> Result<(), ClientError> {
        if !self.tracker.is_current(ticket) {
            debug!("Discarding stale search response");
            return Ok(());
        }

        match result {
            Ok(albums) => {
                debug!(results = albums.len(), "Search results updated");
                self.results = albums;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, query = %self.query, "Search failed");
                self.alert = Some(SEARCH_FAILED);
                Err(e)
            }
        }
    }

    /// Search for `self.query` (albums only).
    pub async fn submit(&mut self, client: &MusicBookClient) -> Result<(), ClientError> {
        let ticket = self.begin();
        let result = client.catalog().search_albums(&self.query).await;
        self.finish(ticket, result)
    }

    /// Fill the list with the catalog's new releases.
    pub async fn show_new_releases(&mut self, client: &MusicBookClient) -> Result<(), ClientError> {
        let ticket = self.begin();
        let result = client.catalog().new_releases().await;
        self.finish(ticket, result)
    }

    /// Fill the list with one artist's albums.
    pub async fn show_artist_albums(
        &mut self,
        client: &MusicBookClient,
        artist_id: &str,
    ) -> Result<(), ClientError> {
        let ticket = self.begin();
        let result = client.catalog().artist_albums(artist_id).await;
        self.finish(ticket, result)
    }
}
