use async_trait::async_trait;

use crate::domain::city::City;
use crate::domain::error::DomainError;
use crate::domain::offer::{NewOffer, Offer, OfferPatch};

/// Opaque offer store. Listings are sorted by publish date, newest first.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn create_offer(&self, input: NewOffer) -> Result<Offer, DomainError>;
    async fn get_offer(&self, id: i64) -> Result<Option<Offer>, DomainError>;
    async fn list_offers(&self, limit: i64) -> Result<Vec<Offer>, DomainError>;
    async fn find_premium_by_city(&self, city: City, limit: i64)
    -> Result<Vec<Offer>, DomainError>;
    async fn update_offer(&self, id: i64, patch: OfferPatch)
    -> Result<Option<Offer>, DomainError>;
    async fn delete_offer(&self, id: i64) -> Result<bool, DomainError>;
    async fn offer_exists(&self, id: i64) -> Result<bool, DomainError>;

    /// Bumps the denormalized comment counter by one.
    async fn increment_comment_count(&self, id: i64) -> Result<(), DomainError>;

    /// Overwrites the denormalized comment counter, used when comments
    /// are removed in bulk.
    async fn set_comment_count(&self, id: i64, count: i32) -> Result<(), DomainError>;

    /// Writes a freshly recomputed mean rating back onto the offer.
    async fn set_rating(&self, id: i64, rating: f64) -> Result<(), DomainError>;
}
