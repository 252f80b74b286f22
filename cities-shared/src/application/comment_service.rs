use chrono::Utc;
use tracing::info;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::offer_repository::OfferRepository;
use crate::domain::comment::{Comment, CreateCommentRequest};
use crate::domain::error::DomainError;

pub const DEFAULT_COMMENT_COUNT: i64 = 50;

/// Rating with no comments behind it.
const UNRATED: f64 = 0.0;

pub struct CommentService<C: CommentRepository, O: OfferRepository> {
    comments: C,
    offers: O,
}

impl<C: CommentRepository, O: OfferRepository> CommentService<C, O> {
    pub fn new(comments: C, offers: O) -> Self {
        Self { comments, offers }
    }

    /// Creates a comment and refreshes the offer's denormalized
    /// aggregates: the comment counter goes up by one, and the rating is
    /// recomputed as the mean over all comments, rounded to one decimal.
    pub async fn create_comment(
        &self,
        author_id: i64,
        offer_id: i64,
        req: CreateCommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;

        if !self.offers.offer_exists(offer_id).await? {
            return Err(DomainError::NotFound(format!("offer id: {offer_id}")));
        }

        let comment = self
            .comments
            .create_comment(NewComment {
                text: req.text,
                rating: req.rating,
                publish_date: Utc::now(),
                author_id,
                offer_id,
            })
            .await?;
        info!(offer_id, "new comment created");

        self.offers.increment_comment_count(offer_id).await?;
        self.recompute_rating(offer_id).await?;

        Ok(comment)
    }

    pub async fn find_by_offer(
        &self,
        offer_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Comment>, DomainError> {
        self.comments
            .find_by_offer(offer_id, limit.unwrap_or(DEFAULT_COMMENT_COUNT))
            .await
    }

    /// Removes every comment of the offer and resets both denormalized
    /// aggregates alongside them.
    pub async fn delete_by_offer(&self, offer_id: i64) -> Result<u64, DomainError> {
        let deleted = self.comments.delete_by_offer(offer_id).await?;
        self.offers.set_comment_count(offer_id, 0).await?;
        self.recompute_rating(offer_id).await?;
        Ok(deleted)
    }

    async fn recompute_rating(&self, offer_id: i64) -> Result<(), DomainError> {
        let rating = match self.comments.average_rating(offer_id).await? {
            Some(average) => (average * 10.0).round() / 10.0,
            None => UNRATED,
        };
        self.offers.set_rating(offer_id, rating).await
    }
}
