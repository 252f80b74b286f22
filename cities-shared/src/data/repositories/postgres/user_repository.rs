use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::user_repository::{FoundOrCreated, UserRepository, UserWithSecret};
use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User, UserType};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UpsertedUserRow {
    id: i64,
    name: String,
    email: String,
    avatar_url: Option<String>,
    user_type: String,
    created: bool,
}

#[derive(sqlx::FromRow)]
struct UserWithSecretRow {
    id: i64,
    name: String,
    email: String,
    avatar_url: Option<String>,
    user_type: String,
    password_hash: String,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert_user_if_absent(&self, input: NewUser) -> Result<FoundOrCreated, DomainError> {
        // The no-op conflict update makes RETURNING yield the stored row;
        // xmax = 0 distinguishes a fresh insert from the existing identity.
        let row = sqlx::query_as::<_, UpsertedUserRow>(
            "INSERT INTO users (name, email, avatar_url, password_hash, user_type) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email \
             RETURNING id, name, email, avatar_url, user_type, (xmax = 0) AS created",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.avatar_url)
        .bind(&input.password_hash)
        .bind(input.user_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        let user = build_user(row.id, row.name, row.email, row.avatar_url, &row.user_type)?;
        Ok(FoundOrCreated {
            user,
            created: row.created,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithSecret>, DomainError> {
        let row = sqlx::query_as::<_, UserWithSecretRow>(
            "SELECT id, name, email, avatar_url, user_type, password_hash \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(|r| {
            let user = build_user(r.id, r.name, r.email, r.avatar_url, &r.user_type)?;
            Ok(UserWithSecret {
                user,
                password_hash: r.password_hash,
            })
        })
        .transpose()
    }

    async fn add_favorite(&self, user_id: i64, offer_id: i64) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO user_favorites (user_id, offer_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(offer_id)
        .execute(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(())
    }

    async fn remove_favorite(&self, user_id: i64, offer_id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM user_favorites WHERE user_id = $1 AND offer_id = $2")
            .bind(user_id)
            .bind(offer_id)
            .execute(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        Ok(())
    }

    async fn list_favorites(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT offer_id FROM user_favorites WHERE user_id = $1 ORDER BY offer_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(ids)
    }
}

fn build_user(
    id: i64,
    name: String,
    email: String,
    avatar_url: Option<String>,
    user_type: &str,
) -> Result<User, DomainError> {
    let user_type = UserType::parse(user_type).ok_or_else(|| {
        DomainError::Unexpected(format!("stored user type '{user_type}' is unknown"))
    })?;

    Ok(User {
        id,
        name,
        email,
        avatar_url,
        user_type,
    })
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("favorite target".to_string());
    }
    DomainError::Unexpected(err.to_string())
}