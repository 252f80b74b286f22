use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub rating: i32,
    pub publish_date: DateTime<Utc>,
    pub author_id: i64,
    pub offer_id: i64,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError>;

    /// Comments for one offer, newest first.
    async fn find_by_offer(&self, offer_id: i64, limit: i64) -> Result<Vec<Comment>, DomainError>;

    /// Bulk delete scoped to one offer; returns the number removed.
    async fn delete_by_offer(&self, offer_id: i64) -> Result<u64, DomainError>;

    /// Mean of the `rating` field across all comments of the offer, or
    /// `None` when there are none.
    async fn average_rating(&self, offer_id: i64) -> Result<Option<f64>, DomainError>;
}
