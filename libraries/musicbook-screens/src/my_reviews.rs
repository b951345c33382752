//! The signed-in user's review history.

use crate::load::{Loadable, RequestTracker, Ticket};
use crate::route::Route;
use musicbook_client::{ClientError, MusicBookClient, Review};
use tracing::{debug, error};

pub const MY_REVIEWS_FAILED: &str = "Failed to load your reviews.";

/// One entry of the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyReviewRow {
    pub album_title: String,
    /// Album detail link; `None` when the server omitted the catalog id
    pub route: Option<Route>,
    pub rating: u8,
    pub comment: String,
}

/// Loads once when mounted; there is no refresh.
#[derive(Debug, Default)]
pub struct MyReviewsScreen {
    state: Loadable<Vec<Review>>,
    mounted: bool,
    tracker: RequestTracker,
}

impl MyReviewsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Loadable<Vec<Review>> {
        &self.state
    }

    /// Start the one and only load. Returns `None` if already mounted.
    pub fn mount(&mut self) -> Option<Ticket> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        self.state = Loadable::Loading;
        Some(self.tracker.begin())
    }

    /// Stop accepting responses for this mount.
    pub fn unmount(&mut self) {
        self.tracker.invalidate();
    }

    pub fn finish(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Review>, ClientError>,
    ) -> Result<(), ClientError> {
        if !self.tracker.is_current(ticket) {
            debug!("Discarding stale review history response");
            return Ok(());
        }

        match result {
            Ok(reviews) => {
                debug!(count = reviews.len(), "Review history loaded");
                self.state = Loadable::Ready(reviews);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load review history");
                self.state = Loadable::Failed(MY_REVIEWS_FAILED);
                Err(e)
            }
        }
    }

    /// Mount and fetch. Subsequent calls do nothing.
    pub async fn load(&mut self, client: &MusicBookClient) -> Result<(), ClientError> {
        let Some(ticket) = self.mount() else {
            return Ok(());
        };
        let result = client.reviews().mine().await;
        self.finish(ticket, result)
    }

    pub fn rows(&self) -> Vec<MyReviewRow> {
        self.state
            .ready()
            .map(|reviews| reviews.iter().map(row).collect())
            .unwrap_or_default()
    }
}

fn row(review: &Review) -> MyReviewRow {
    MyReviewRow {
        album_title: review
            .album
            .as_ref()
            .map(|a| a.title.clone())
            .unwrap_or_default(),
        route: review
            .spotify_album_id()
            .map(|id| Route::Album(id.to_string())),
        rating: review.rating,
        comment: review.comment.clone(),
    }
}
