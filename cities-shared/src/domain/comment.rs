use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

pub const MIN_COMMENT_LENGTH: usize = 5;
pub const MAX_COMMENT_LENGTH: usize = 1024;
pub const MIN_COMMENT_RATING: i32 = 1;
pub const MAX_COMMENT_RATING: i32 = 5;

/// A comment belongs to both its author and its offer; neither owns the
/// other, removal of the offer cascades at the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub rating: i32,
    pub publish_date: DateTime<Utc>,
    pub author_id: i64,
    pub offer_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
    pub rating: i32,
}

impl CreateCommentRequest {
    pub fn validate(self) -> Result<Self, DomainError> {
        let text = self.text.trim().to_string();
        let len = text.chars().count();
        if !(MIN_COMMENT_LENGTH..=MAX_COMMENT_LENGTH).contains(&len) {
            return Err(DomainError::Validation {
                field: "text",
                message: "must be 5..1024 chars",
            });
        }
        if !(MIN_COMMENT_RATING..=MAX_COMMENT_RATING).contains(&self.rating) {
            return Err(DomainError::Validation {
                field: "rating",
                message: "must be within 1..5",
            });
        }
        Ok(Self {
            text,
            rating: self.rating,
        })
    }
}
