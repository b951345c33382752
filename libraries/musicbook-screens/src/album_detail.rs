//! Album detail screen: metadata, community reviews and the review form.

use crate::load::{prepend, Loadable, RequestTracker, Ticket};
use musicbook_client::{
    AlbumDetails, AlbumWithReviews, ClientError, MusicBookClient, NewReview, Rating, Review,
};
use tracing::{debug, error};

pub const ALBUM_LOAD_FAILED: &str = "Failed to load album details.";
pub const REVIEW_SUBMIT_FAILED: &str = "Failed to submit review.";

/// Loaded content of the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumView {
    pub details: AlbumDetails,
    /// Newest first; locally created reviews are prepended
    pub reviews: Vec<Review>,
}

impl From<AlbumWithReviews> for AlbumView {
    fn from(value: AlbumWithReviews) -> Self {
        Self {
            details: value.spotify_details,
            reviews: value.local_reviews,
        }
    }
}

/// Review form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    pub rating: Rating,
    pub comment: String,
}

impl ReviewForm {
    /// Back to rating 5 and an empty comment.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
pub struct AlbumDetailScreen {
    album_id: String,
    state: Loadable<AlbumView>,
    pub form: ReviewForm,
    alert: Option<&'static str>,
    tracker: RequestTracker,
}

impl AlbumDetailScreen {
    pub fn new(album_id: impl Into<String>) -> Self {
        Self {
            album_id: album_id.into(),
            state: Loadable::Idle,
            form: ReviewForm::default(),
            alert: None,
            tracker: RequestTracker::new(),
        }
    }

    pub fn album_id(&self) -> &str {
        &self.album_id
    }

    pub fn state(&self) -> &Loadable<AlbumView> {
        &self.state
    }

    /// Reviews currently displayed (empty until loaded).
    pub fn reviews(&self) -> &[Review] {
        self.state.ready().map(|v| v.reviews.as_slice()).unwrap_or(&[])
    }

    pub fn alert(&self) -> Option<&'static str> {
        self.alert
    }

    /// Pending alert, if any. Reading it dismisses it.
    pub fn take_alert(&mut self) -> Option<&'static str> {
        self.alert.take()
    }

    /// Point the screen at `album_id` and start loading it.
    ///
    /// Any request still in flight for the previous id becomes stale.
    pub fn enter(&mut self, album_id: &str) -> Ticket {
        if self.album_id != album_id {
            debug!(from = %self.album_id, to = %album_id, "Album changed");
            self.album_id = album_id.to_string();
        }
        self.state = Loadable::Loading;
        self.tracker.begin()
    }

    /// Apply an album detail response. Stale responses are dropped.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<AlbumWithReviews, ClientError>,
    ) -> Result<(), ClientError> {
        if !self.tracker.is_current(ticket) {
            debug!(album_id = %self.album_id, "Discarding stale album response");
            return Ok(());
        }

        match result {
            Ok(data) => {
                self.state = Loadable::Ready(data.into());
                Ok(())
            }
            Err(e) => {
                error!(error = %e, album_id = %self.album_id, "Failed to load album");
                self.state = Loadable::Failed(ALBUM_LOAD_FAILED);
                Err(e)
            }
        }
    }

    /// Load (or reload) the current album.
    pub async fn load(&mut self, client: &MusicBookClient) -> Result<(), ClientError> {
        let album_id = self.album_id.clone();
        let ticket = self.enter(&album_id);
        let result = client.catalog().album_details(&album_id).await;
        self.finish_load(ticket, result)
    }

    /// The request the form would submit right now.
    pub fn review_request(&self) -> NewReview {
        NewReview {
            spotify_album_id: self.album_id.clone(),
            rating: self.form.rating,
            comment: self.form.comment.clone(),
        }
    }

    /// Capture the form for submission, tied to the album on screen.
    pub fn begin_submit(&mut self) -> (Ticket, NewReview) {
        self.alert = None;
        (self.tracker.current(), self.review_request())
    }

    /// Apply a review submission response.
    ///
    /// Success puts the returned record at the top of the list and resets the
    /// form. Failure raises an alert and keeps the form as typed. A response
    /// that arrives after the screen moved to another album is dropped.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: Result<Review, ClientError>,
    ) -> Result<(), ClientError> {
        match result {
            Ok(review) => {
                if !self.tracker.is_current(ticket) {
                    debug!(review_id = review.id, "Discarding review for a previous album");
                    return Ok(());
                }
                if let Some(view) = self.state.ready_mut() {
                    view.reviews = prepend(std::mem::take(&mut view.reviews), review);
                }
                self.form.reset();
                Ok(())
            }
            Err(e) => {
                error!(error = %e, album_id = %self.album_id, "Failed to submit review");
                self.alert = Some(REVIEW_SUBMIT_FAILED);
                Err(e)
            }
        }
    }

    /// Post the form as a new review for this album.
    pub async fn submit_review(&mut self, client: &MusicBookClient) -> Result<(), ClientError> {
        let (ticket, request) = self.begin_submit();
        let result = client.reviews().create(&request).await;
        self.finish_submit(ticket, result)
    }
}
