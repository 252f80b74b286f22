use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    text: String,
    rating: i32,
    publish_date: DateTime<Utc>,
    author_id: i64,
    offer_id: i64,
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            "INSERT INTO comments (text, rating, publish_date, author_id, offer_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, text, rating, publish_date, author_id, offer_id",
        )
        .bind(&input.text)
        .bind(input.rating)
        .bind(input.publish_date)
        .bind(input.author_id)
        .bind(input.offer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(map_row_to_comment(row))
    }

    async fn find_by_offer(&self, offer_id: i64, limit: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT id, text, rating, publish_date, author_id, offer_id \
             FROM comments WHERE offer_id = $1 \
             ORDER BY publish_date DESC, id DESC LIMIT $2",
        )
        .bind(offer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(rows.into_iter().map(map_row_to_comment).collect())
    }

    async fn delete_by_offer(&self, offer_id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE offer_id = $1")
            .bind(offer_id)
            .execute(&self.pool)
            .await
            .map_err(map_comment_db_error)?;

        Ok(result.rows_affected())
    }

    async fn average_rating(&self, offer_id: i64) -> Result<Option<f64>, DomainError> {
        // Group-by-null average over every comment of the offer; NULL when
        // there are none.
        let average = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(rating)::DOUBLE PRECISION FROM comments WHERE offer_id = $1",
        )
        .bind(offer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(average)
    }
}

fn map_row_to_comment(row: CommentRow) -> Comment {
    Comment {
        id: row.id,
        text: row.text,
        rating: row.rating,
        publish_date: row.publish_date,
        author_id: row.author_id,
        offer_id: row.offer_id,
    }
}

fn map_comment_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("comment target".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
