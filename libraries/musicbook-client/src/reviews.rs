//! Review submission and listing.

use crate::client::MusicBookClient;
use crate::error::Result;
use crate::types::{NewReview, Review};
use tracing::{debug, info};

/// Review endpoints.
pub struct ReviewsClient<'a> {
    client: &'a MusicBookClient,
}

impl<'a> ReviewsClient<'a> {
    pub(crate) fn new(client: &'a MusicBookClient) -> Self {
        Self { client }
    }

    /// Create a review and return the record as stored by the server.
    pub async fn create(&self, review: &NewReview) -> Result<Review> {
        debug!(
            album_id = %review.spotify_album_id,
            rating = %review.rating,
            "Submitting review"
        );

        let created: Review = self.client.post("/reviews/", review).await?;

        info!(review_id = created.id, "Review created");
        Ok(created)
    }

    /// Reviews written by the authenticated user.
    pub async fn mine(&self) -> Result<Vec<Review>> {
        let reviews: Vec<Review> = self.client.get("/reviews/", &[("user", "me")]).await?;

        debug!(count = reviews.len(), "Fetched own reviews");
        Ok(reviews)
    }
}
