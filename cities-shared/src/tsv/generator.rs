use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::city::{City, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::domain::offer::{
    Amenity, IMAGES_COUNT, MAX_GUESTS, MAX_PRICE, MAX_ROOMS, MIN_GUESTS, MIN_PRICE, MIN_ROOMS,
    PropertyType,
};

pub const MIN_COMMENTS_COUNT: i32 = 0;
pub const MAX_COMMENTS_COUNT: i32 = 10;

const PUBLISH_WINDOW_DAYS: i64 = 90;

/// Source lists fetched from the mock server.
#[derive(Debug, Clone, Deserialize)]
pub struct MockServerData {
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub avatars: Vec<String>,
    #[serde(default)]
    pub passwords: Vec<String>,
    #[serde(default, rename = "previewImages")]
    pub preview_images: Vec<String>,
}

#[derive(Debug, Error)]
#[error("mock data is missing '{list}'")]
pub struct MockDataError {
    pub list: &'static str,
}

/// Emits synthetic offers in the canonical 17-column line format, one row
/// per `generate` call.
#[derive(Debug, Clone)]
pub struct TsvOfferGenerator {
    data: MockServerData,
}

impl TsvOfferGenerator {
    pub fn new(mut data: MockServerData) -> Result<Self, MockDataError> {
        // Older mock servers publish the image pool as `previewImages`.
        if data.images.is_empty() {
            data.images = std::mem::take(&mut data.preview_images);
        }

        if data.titles.is_empty() {
            return Err(MockDataError { list: "titles" });
        }
        if data.descriptions.is_empty() {
            return Err(MockDataError { list: "descriptions" });
        }
        if data.images.is_empty() {
            return Err(MockDataError { list: "images" });
        }
        if data.emails.is_empty() {
            return Err(MockDataError { list: "emails" });
        }

        Ok(Self { data })
    }

    pub fn generate(&self) -> String {
        let mut rng = rand::rng();

        let title = pick(&mut rng, &self.data.titles);
        let description = pick(&mut rng, &self.data.descriptions);

        let publish_date = Utc::now() - Duration::days(rng.random_range(0..=PUBLISH_WINDOW_DAYS));
        let publish_date = publish_date.format("%d.%m.%Y").to_string();

        let city = City::ALL[rng.random_range(0..City::ALL.len())];

        let preview_image = pick(&mut rng, &self.data.images);
        let (stem, extension) = preview_image.split_once('.').unwrap_or((preview_image, "jpg"));
        let images: Vec<String> = (0..IMAGES_COUNT)
            .map(|i| format!("{stem}-{i}.{extension}"))
            .collect();

        let is_premium = rng.random_bool(0.5);
        let is_favorite = rng.random_bool(0.5);

        let rating = format!("{:.1}", rng.random_range(10..=50) as f64 / 10.0);

        let property_type = PropertyType::ALL[rng.random_range(0..PropertyType::ALL.len())];
        let rooms = rng.random_range(MIN_ROOMS..=MAX_ROOMS);
        let guests = rng.random_range(MIN_GUESTS..=MAX_GUESTS);
        let price = rng.random_range(MIN_PRICE..=MAX_PRICE);

        let mut amenity_pool = Amenity::ALL.to_vec();
        amenity_pool.shuffle(&mut rng);
        let amenities_count = rng.random_range(1..=amenity_pool.len());
        let amenities = amenity_pool[..amenities_count]
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let user_email = pick(&mut rng, &self.data.emails);

        let comments_count = rng.random_range(MIN_COMMENTS_COUNT..=MAX_COMMENTS_COUNT);

        let latitude = format!("{:.6}", rng.random_range(MIN_LATITUDE..=MAX_LATITUDE));
        let longitude = format!("{:.6}", rng.random_range(MIN_LONGITUDE..=MAX_LONGITUDE));

        [
            title.to_string(),
            description.to_string(),
            publish_date,
            city.as_str().to_string(),
            preview_image.to_string(),
            images.join(" "),
            is_premium.to_string(),
            is_favorite.to_string(),
            rating,
            property_type.as_str().to_string(),
            rooms.to_string(),
            guests.to_string(),
            price.to_string(),
            amenities,
            user_email.to_string(),
            comments_count.to_string(),
            format!("{latitude} {longitude}"),
        ]
        .join("\t")
    }
}

fn pick<'a>(rng: &mut impl Rng, items: &'a [String]) -> &'a str {
    // The constructor guarantees every sampled list is non-empty.
    &items[rng.random_range(0..items.len())]
}
