use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::city::{City, Location};
use super::error::DomainError;

pub const MIN_TITLE_LENGTH: usize = 10;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MIN_DESCRIPTION_LENGTH: usize = 20;
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;
pub const IMAGES_COUNT: usize = 6;
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;
pub const MIN_ROOMS: i32 = 1;
pub const MAX_ROOMS: i32 = 8;
pub const MIN_GUESTS: i32 = 1;
pub const MAX_GUESTS: i32 = 10;
pub const MIN_PRICE: i32 = 100;
pub const MAX_PRICE: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    House,
    Room,
    Hotel,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Room,
        PropertyType::Hotel,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "apartment" => Some(PropertyType::Apartment),
            "house" => Some(PropertyType::House),
            "room" => Some(PropertyType::Room),
            "hotel" => Some(PropertyType::Hotel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Room => "room",
            PropertyType::Hotel => "hotel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amenity {
    Breakfast,
    AirConditioning,
    LaptopFriendlyWorkspace,
    BabySeat,
    Washer,
    Towels,
    Fridge,
}

impl Amenity {
    pub const ALL: [Amenity; 7] = [
        Amenity::Breakfast,
        Amenity::AirConditioning,
        Amenity::LaptopFriendlyWorkspace,
        Amenity::BabySeat,
        Amenity::Washer,
        Amenity::Towels,
        Amenity::Fridge,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Breakfast" => Some(Amenity::Breakfast),
            "Air conditioning" => Some(Amenity::AirConditioning),
            "Laptop friendly workspace" => Some(Amenity::LaptopFriendlyWorkspace),
            "Baby seat" => Some(Amenity::BabySeat),
            "Washer" => Some(Amenity::Washer),
            "Towels" => Some(Amenity::Towels),
            "Fridge" => Some(Amenity::Fridge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Amenity::Breakfast => "Breakfast",
            Amenity::AirConditioning => "Air conditioning",
            Amenity::LaptopFriendlyWorkspace => "Laptop friendly workspace",
            Amenity::BabySeat => "Baby seat",
            Amenity::Washer => "Washer",
            Amenity::Towels => "Towels",
            Amenity::Fridge => "Fridge",
        }
    }
}

/// Persisted offer document. `rating` and `comments_count` are denormalized
/// aggregates maintained by the comment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub publish_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    pub property_type: PropertyType,
    pub rooms: i32,
    pub guests: i32,
    pub price: i32,
    pub amenities: Vec<Amenity>,
    pub user_id: i64,
    pub comments_count: i32,
    pub location: Location,
}

/// Insert shape: everything but the identifier the store assigns.
#[derive(Debug, Clone)]
pub struct NewOffer {
    pub title: String,
    pub description: String,
    pub publish_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    pub property_type: PropertyType,
    pub rooms: i32,
    pub guests: i32,
    pub price: i32,
    pub amenities: Vec<Amenity>,
    pub user_id: i64,
    pub comments_count: i32,
    pub location: Location,
}

impl NewOffer {
    /// Range and membership checks shared by the create endpoint and the
    /// import pipeline. A violation rejects the whole record.
    pub fn validate(self) -> Result<Self, DomainError> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        if self.preview_image.is_empty() {
            return Err(DomainError::Validation {
                field: "preview_image",
                message: "must not be empty",
            });
        }
        if self.images.len() != IMAGES_COUNT || self.images.iter().any(|img| img.is_empty()) {
            return Err(DomainError::Validation {
                field: "images",
                message: "must hold exactly 6 non-empty entries",
            });
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) && self.rating != 0.0 {
            return Err(DomainError::Validation {
                field: "rating",
                message: "must be within 1.0..5.0",
            });
        }
        if !(MIN_ROOMS..=MAX_ROOMS).contains(&self.rooms) {
            return Err(DomainError::Validation {
                field: "rooms",
                message: "must be within 1..8",
            });
        }
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&self.guests) {
            return Err(DomainError::Validation {
                field: "guests",
                message: "must be within 1..10",
            });
        }
        if !(MIN_PRICE..=MAX_PRICE).contains(&self.price) {
            return Err(DomainError::Validation {
                field: "price",
                message: "must be within 100..100000",
            });
        }
        if self.amenities.is_empty() {
            return Err(DomainError::Validation {
                field: "amenities",
                message: "must not be empty",
            });
        }
        if self.comments_count < 0 {
            return Err(DomainError::Validation {
                field: "comments_count",
                message: "must be >= 0",
            });
        }
        Ok(self)
    }
}

/// Partial update applied by `updateById`; absent fields keep stored values.
#[derive(Debug, Clone, Default)]
pub struct OfferPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub is_premium: Option<bool>,
}

impl OfferPatch {
    pub fn validate(self) -> Result<Self, DomainError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(price) = self.price
            && !(MIN_PRICE..=MAX_PRICE).contains(&price)
        {
            return Err(DomainError::Validation {
                field: "price",
                message: "must be within 100..100000",
            });
        }
        Ok(self)
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    let len = title.chars().count();
    if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&len) {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 10..100 chars",
        });
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), DomainError> {
    let len = description.chars().count();
    if !(MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&len) {
        return Err(DomainError::Validation {
            field: "description",
            message: "must be 20..1024 chars",
        });
    }
    Ok(())
}
