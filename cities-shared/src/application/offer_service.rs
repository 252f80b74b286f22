use tracing::info;

use crate::data::offer_repository::OfferRepository;
use crate::domain::city::City;
use crate::domain::error::DomainError;
use crate::domain::offer::{NewOffer, Offer, OfferPatch};

pub const DEFAULT_OFFER_COUNT: i64 = 60;
pub const PREMIUM_OFFER_COUNT: i64 = 3;

pub struct OfferService<R: OfferRepository> {
    repo: R,
}

impl<R: OfferRepository> OfferService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_offer(&self, input: NewOffer) -> Result<Offer, DomainError> {
        let input = input.validate()?;
        let offer = self.repo.create_offer(input).await?;
        info!(offer_id = offer.id, "new offer created");
        Ok(offer)
    }

    pub async fn get_offer(&self, id: i64) -> Result<Offer, DomainError> {
        self.repo
            .get_offer(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("offer id: {id}")))
    }

    /// Newest offers first, at most `limit` of them (60 when unset).
    pub async fn list_offers(&self, limit: Option<i64>) -> Result<Vec<Offer>, DomainError> {
        self.repo
            .list_offers(limit.unwrap_or(DEFAULT_OFFER_COUNT))
            .await
    }

    pub async fn find_premium_by_city(&self, city: City) -> Result<Vec<Offer>, DomainError> {
        self.repo
            .find_premium_by_city(city, PREMIUM_OFFER_COUNT)
            .await
    }

    pub async fn update_offer(&self, id: i64, patch: OfferPatch) -> Result<Offer, DomainError> {
        let patch = patch.validate()?;
        self.repo
            .update_offer(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("offer id: {id}")))
    }

    pub async fn delete_offer(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete_offer(id).await? {
            return Err(DomainError::NotFound(format!("offer id: {id}")));
        }
        info!(offer_id = id, "offer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::data::offer_repository::OfferRepository;
    use crate::domain::city::{City, Location};
    use crate::domain::error::DomainError;
    use crate::domain::offer::{Amenity, NewOffer, Offer, OfferPatch, PropertyType};

    use super::{DEFAULT_OFFER_COUNT, OfferService, PREMIUM_OFFER_COUNT};

    #[derive(Clone, Default)]
    struct FakeOfferRepo {
        offers: Arc<Mutex<Vec<Offer>>>,
        last_limit: Arc<Mutex<Option<i64>>>,
    }

    #[async_trait]
    impl OfferRepository for FakeOfferRepo {
        async fn create_offer(&self, input: NewOffer) -> Result<Offer, DomainError> {
            let mut offers = self.offers.lock().expect("offers mutex poisoned");
            let offer = Offer {
                id: offers.len() as i64 + 1,
                title: input.title,
                description: input.description,
                publish_date: input.publish_date,
                city: input.city,
                preview_image: input.preview_image,
                images: input.images,
                is_premium: input.is_premium,
                is_favorite: input.is_favorite,
                rating: input.rating,
                property_type: input.property_type,
                rooms: input.rooms,
                guests: input.guests,
                price: input.price,
                amenities: input.amenities,
                user_id: input.user_id,
                comments_count: input.comments_count,
                location: input.location,
            };
            offers.push(offer.clone());
            Ok(offer)
        }

        async fn get_offer(&self, id: i64) -> Result<Option<Offer>, DomainError> {
            let offers = self.offers.lock().expect("offers mutex poisoned");
            Ok(offers.iter().find(|o| o.id == id).cloned())
        }

        async fn list_offers(&self, limit: i64) -> Result<Vec<Offer>, DomainError> {
            *self.last_limit.lock().expect("limit mutex poisoned") = Some(limit);
            let offers = self.offers.lock().expect("offers mutex poisoned");
            Ok(offers.iter().take(limit as usize).cloned().collect())
        }

        async fn find_premium_by_city(
            &self,
            city: City,
            limit: i64,
        ) -> Result<Vec<Offer>, DomainError> {
            *self.last_limit.lock().expect("limit mutex poisoned") = Some(limit);
            let offers = self.offers.lock().expect("offers mutex poisoned");
            Ok(offers
                .iter()
                .filter(|o| o.city == city && o.is_premium)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn update_offer(
            &self,
            id: i64,
            patch: OfferPatch,
        ) -> Result<Option<Offer>, DomainError> {
            let mut offers = self.offers.lock().expect("offers mutex poisoned");
            let Some(offer) = offers.iter_mut().find(|o| o.id == id) else {
                return Ok(None);
            };
            if let Some(title) = patch.title {
                offer.title = title;
            }
            if let Some(description) = patch.description {
                offer.description = description;
            }
            if let Some(price) = patch.price {
                offer.price = price;
            }
            if let Some(is_premium) = patch.is_premium {
                offer.is_premium = is_premium;
            }
            Ok(Some(offer.clone()))
        }

        async fn delete_offer(&self, id: i64) -> Result<bool, DomainError> {
            let mut offers = self.offers.lock().expect("offers mutex poisoned");
            let before = offers.len();
            offers.retain(|o| o.id != id);
            Ok(offers.len() != before)
        }

        async fn offer_exists(&self, id: i64) -> Result<bool, DomainError> {
            let offers = self.offers.lock().expect("offers mutex poisoned");
            Ok(offers.iter().any(|o| o.id == id))
        }

        async fn increment_comment_count(&self, _id: i64) -> Result<(), DomainError> {
            Ok(())
        }

        async fn set_comment_count(&self, _id: i64, _count: i32) -> Result<(), DomainError> {
            Ok(())
        }

        async fn set_rating(&self, _id: i64, _rating: f64) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn sample_new_offer() -> NewOffer {
        NewOffer {
            title: "Cozy loft in the old town".to_string(),
            description: "Bright two-room loft a short walk from the canal.".to_string(),
            publish_date: Utc::now(),
            city: City::Amsterdam,
            preview_image: "preview.jpg".to_string(),
            images: (0..6).map(|i| format!("photo-{i}.jpg")).collect(),
            is_premium: true,
            is_favorite: false,
            rating: 4.2,
            property_type: PropertyType::Apartment,
            rooms: 2,
            guests: 4,
            price: 1200,
            amenities: vec![Amenity::Breakfast],
            user_id: 1,
            comments_count: 0,
            location: Location {
                latitude: 52.370216,
                longitude: 4.895168,
            },
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let service = OfferService::new(FakeOfferRepo::default());

        let created = service
            .create_offer(sample_new_offer())
            .await
            .expect("offer must be created");
        let fetched = service
            .get_offer(created.id)
            .await
            .expect("offer must be found");
        assert_eq!(fetched.title, "Cozy loft in the old town");
    }

    #[tokio::test]
    async fn create_rejects_invalid_offer_before_persisting() {
        let repo = FakeOfferRepo::default();
        let service = OfferService::new(repo.clone());

        let offer = NewOffer {
            price: 50,
            ..sample_new_offer()
        };
        let err = service
            .create_offer(offer)
            .await
            .expect_err("price must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "price", .. }));
        assert!(repo.offers.lock().expect("offers").is_empty());
    }

    #[tokio::test]
    async fn get_missing_offer_is_not_found() {
        let service = OfferService::new(FakeOfferRepo::default());
        let err = service.get_offer(42).await.expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_uses_default_limit_when_unset() {
        let repo = FakeOfferRepo::default();
        let service = OfferService::new(repo.clone());

        service.list_offers(None).await.expect("list must succeed");
        assert_eq!(
            *repo.last_limit.lock().expect("limit"),
            Some(DEFAULT_OFFER_COUNT)
        );

        service
            .list_offers(Some(10))
            .await
            .expect("list must succeed");
        assert_eq!(*repo.last_limit.lock().expect("limit"), Some(10));
    }

    #[tokio::test]
    async fn premium_lookup_is_capped_at_three() {
        let repo = FakeOfferRepo::default();
        let service = OfferService::new(repo.clone());

        for _ in 0..5 {
            service
                .create_offer(sample_new_offer())
                .await
                .expect("offer must be created");
        }

        let premium = service
            .find_premium_by_city(City::Amsterdam)
            .await
            .expect("lookup must succeed");
        assert_eq!(premium.len(), PREMIUM_OFFER_COUNT as usize);
        assert!(premium.iter().all(|o| o.is_premium));
    }

    #[tokio::test]
    async fn update_patches_only_provided_fields() {
        let service = OfferService::new(FakeOfferRepo::default());
        let created = service
            .create_offer(sample_new_offer())
            .await
            .expect("offer must be created");

        let updated = service
            .update_offer(
                created.id,
                OfferPatch {
                    price: Some(900),
                    ..OfferPatch::default()
                },
            )
            .await
            .expect("update must succeed");
        assert_eq!(updated.price, 900);
        assert_eq!(updated.title, created.title);

        let err = service
            .update_offer(99, OfferPatch::default())
            .await
            .expect_err("missing offer must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_offer_is_not_found() {
        let service = OfferService::new(FakeOfferRepo::default());
        let created = service
            .create_offer(sample_new_offer())
            .await
            .expect("offer must be created");

        service
            .delete_offer(created.id)
            .await
            .expect("delete must succeed");
        let err = service
            .delete_offer(created.id)
            .await
            .expect_err("second delete must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
