use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::offer_repository::OfferRepository;
use crate::domain::city::{City, Location};
use crate::domain::error::DomainError;
use crate::domain::offer::{Amenity, NewOffer, Offer, OfferPatch, PropertyType};

#[derive(Debug, Clone)]
pub struct PostgresOfferRepository {
    pool: PgPool,
}

impl PostgresOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    id: i64,
    title: String,
    description: String,
    publish_date: DateTime<Utc>,
    city: String,
    preview_image: String,
    images: Vec<String>,
    is_premium: bool,
    is_favorite: bool,
    rating: f64,
    property_type: String,
    rooms: i32,
    guests: i32,
    price: i32,
    amenities: Vec<String>,
    user_id: i64,
    comments_count: i32,
    latitude: f64,
    longitude: f64,
}

const OFFER_COLUMNS: &str = "id, title, description, publish_date, city, preview_image, images, \
     is_premium, is_favorite, rating, property_type, rooms, guests, price, \
     amenities, user_id, comments_count, latitude, longitude";

#[async_trait]
impl OfferRepository for PostgresOfferRepository {
    async fn create_offer(&self, input: NewOffer) -> Result<Offer, DomainError> {
        let amenities: Vec<String> = input
            .amenities
            .iter()
            .map(|a| a.as_str().to_string())
            .collect();

        let sql = format!(
            "INSERT INTO offers (title, description, publish_date, city, preview_image, images, \
             is_premium, is_favorite, rating, property_type, rooms, guests, price, amenities, \
             user_id, comments_count, latitude, longitude) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
             RETURNING {OFFER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.publish_date)
            .bind(input.city.as_str())
            .bind(&input.preview_image)
            .bind(&input.images)
            .bind(input.is_premium)
            .bind(input.is_favorite)
            .bind(input.rating)
            .bind(input.property_type.as_str())
            .bind(input.rooms)
            .bind(input.guests)
            .bind(input.price)
            .bind(&amenities)
            .bind(input.user_id)
            .bind(input.comments_count)
            .bind(input.location.latitude)
            .bind(input.location.longitude)
            .fetch_one(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        map_row_to_offer(row)
    }

    async fn get_offer(&self, id: i64) -> Result<Option<Offer>, DomainError> {
        let sql = format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1");
        let row = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        row.map(map_row_to_offer).transpose()
    }

    async fn list_offers(&self, limit: i64) -> Result<Vec<Offer>, DomainError> {
        let sql = format!(
            "SELECT {OFFER_COLUMNS} FROM offers ORDER BY publish_date DESC, id DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        rows.into_iter().map(map_row_to_offer).collect()
    }

    async fn find_premium_by_city(
        &self,
        city: City,
        limit: i64,
    ) -> Result<Vec<Offer>, DomainError> {
        let sql = format!(
            "SELECT {OFFER_COLUMNS} FROM offers \
             WHERE city = $1 AND is_premium \
             ORDER BY publish_date DESC, id DESC LIMIT $2"
        );
        let rows = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(city.as_str())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        rows.into_iter().map(map_row_to_offer).collect()
    }

    async fn update_offer(
        &self,
        id: i64,
        patch: OfferPatch,
    ) -> Result<Option<Offer>, DomainError> {
        let sql = format!(
            "UPDATE offers \
             SET title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 price = COALESCE($4, price), \
                 is_premium = COALESCE($5, is_premium) \
             WHERE id = $1 \
             RETURNING {OFFER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OfferRow>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.price)
            .bind(patch.is_premium)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        row.map(map_row_to_offer).transpose()
    }

    async fn delete_offer(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn offer_exists(&self, id: i64) -> Result<bool, DomainError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM offers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        Ok(exists)
    }

    async fn increment_comment_count(&self, id: i64) -> Result<(), DomainError> {
        sqlx::query("UPDATE offers SET comments_count = comments_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        Ok(())
    }

    async fn set_comment_count(&self, id: i64, count: i32) -> Result<(), DomainError> {
        sqlx::query("UPDATE offers SET comments_count = $2 WHERE id = $1")
            .bind(id)
            .bind(count)
            .execute(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        Ok(())
    }

    async fn set_rating(&self, id: i64, rating: f64) -> Result<(), DomainError> {
        sqlx::query("UPDATE offers SET rating = $2 WHERE id = $1")
            .bind(id)
            .bind(rating)
            .execute(&self.pool)
            .await
            .map_err(map_offer_db_error)?;

        Ok(())
    }
}

fn map_row_to_offer(row: OfferRow) -> Result<Offer, DomainError> {
    let city = City::parse(&row.city)
        .ok_or_else(|| DomainError::Unexpected(format!("stored city '{}' is unknown", row.city)))?;
    let property_type = PropertyType::parse(&row.property_type).ok_or_else(|| {
        DomainError::Unexpected(format!(
            "stored property type '{}' is unknown",
            row.property_type
        ))
    })?;
    let amenities = row
        .amenities
        .iter()
        .map(|raw| {
            Amenity::parse(raw)
                .ok_or_else(|| DomainError::Unexpected(format!("stored amenity '{raw}' is unknown")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let location = Location::new(row.latitude, row.longitude)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Ok(Offer {
        id: row.id,
        title: row.title,
        description: row.description,
        publish_date: row.publish_date,
        city,
        preview_image: row.preview_image,
        images: row.images,
        is_premium: row.is_premium,
        is_favorite: row.is_favorite,
        rating: row.rating,
        property_type,
        rooms: row.rooms,
        guests: row.guests,
        price: row.price,
        amenities,
        user_id: row.user_id,
        comments_count: row.comments_count,
        location,
    })
}

fn map_offer_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("offer owner".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
