use chrono::{DateTime, Utc};

use crate::domain::city::{City, Location, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::domain::offer::{
    Amenity, IMAGES_COUNT, MAX_DESCRIPTION_LENGTH, MAX_GUESTS, MAX_PRICE, MAX_RATING, MAX_ROOMS,
    MAX_TITLE_LENGTH, MIN_DESCRIPTION_LENGTH, MIN_GUESTS, MIN_PRICE, MIN_RATING, MIN_ROOMS,
    MIN_TITLE_LENGTH, PropertyType,
};
use crate::domain::user::UserType;

use super::RowRejection;
use super::coerce::{parse_bool, parse_f64, parse_i32, parse_publish_date};
use super::record::OfferRecord;

/// A user identity the import file may reference. The password is still
/// plaintext here; hashing happens when the import driver persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportUser {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub password: String,
    pub user_type: UserType,
}

/// A fully validated offer that has not been persisted yet. Unlike the
/// stored document it carries the resolved owner identity, not an id.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferDraft {
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
    pub user: ImportUser,
    pub comments_count: i32,
    pub location: Location,
}

impl OfferDraft {
    /// Serializes back into the canonical 17-column line. Feeding the
    /// result through the parser and factory again yields an equal draft.
    pub fn to_tsv_line(&self) -> String {
        let amenities = self
            .amenities
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(",");

        [
            self.title.clone(),
            self.description.clone(),
            self.publish_date.to_rfc3339(),
            self.city.as_str().to_string(),
            self.preview_image.clone(),
            self.images.join(" "),
            self.is_premium.to_string(),
            self.is_favorite.to_string(),
            self.rating.to_string(),
            self.property_type.as_str().to_string(),
            self.rooms.to_string(),
            self.guests.to_string(),
            self.price.to_string(),
            amenities,
            self.user.email.clone(),
            self.comments_count.to_string(),
            format!("{} {}", self.location.latitude, self.location.longitude),
        ]
        .join("\t")
    }
}

pub struct OfferFactory;

impl OfferFactory {
    /// Turns one raw record into a validated draft, or reports the first
    /// failing check. All failures collapse to a rejection; nothing
    /// panics or propagates out of this boundary.
    pub fn create(record: &OfferRecord, users: &[ImportUser]) -> Result<OfferDraft, RowRejection> {
        let title_len = record.title.chars().count();
        if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&title_len) {
            return Err(reject("title", "must be 10..100 chars"));
        }

        let description_len = record.description.chars().count();
        if !(MIN_DESCRIPTION_LENGTH..=MAX_DESCRIPTION_LENGTH).contains(&description_len) {
            return Err(reject("description", "must be 20..1024 chars"));
        }

        let publish_date = parse_publish_date(&record.publish_date)
            .ok_or_else(|| reject("publish_date", "must be a valid calendar date"))?;

        let city = City::parse(&record.city)
            .ok_or_else(|| reject("city", "must be one of the six cities"))?;

        if record.preview_image.is_empty() {
            return Err(reject("preview_image", "must not be empty"));
        }

        let images: Vec<String> = record.images.split(' ').map(str::to_string).collect();
        if images.len() != IMAGES_COUNT || images.iter().any(|img| img.is_empty()) {
            return Err(reject("images", "must hold exactly 6 non-empty entries"));
        }

        let is_premium = parse_bool(&record.is_premium);
        let is_favorite = parse_bool(&record.is_favorite);

        let rating = parse_f64(&record.rating)
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
            .ok_or_else(|| reject("rating", "must be a number within 1..5"))?;

        let property_type = PropertyType::parse(&record.property_type)
            .ok_or_else(|| reject("property_type", "must be apartment, house, room or hotel"))?;

        let rooms = parse_i32(&record.rooms)
            .filter(|r| (MIN_ROOMS..=MAX_ROOMS).contains(r))
            .ok_or_else(|| reject("rooms", "must be an integer within 1..8"))?;

        let guests = parse_i32(&record.guests)
            .filter(|g| (MIN_GUESTS..=MAX_GUESTS).contains(g))
            .ok_or_else(|| reject("guests", "must be an integer within 1..10"))?;

        let price = parse_i32(&record.price)
            .filter(|p| (MIN_PRICE..=MAX_PRICE).contains(p))
            .ok_or_else(|| reject("price", "must be an integer within 100..100000"))?;

        // Unknown amenity tokens are filtered out; an empty remainder
        // rejects the row.
        let amenities: Vec<Amenity> = record
            .amenities
            .split(',')
            .filter_map(|token| Amenity::parse(token.trim()))
            .collect();
        if amenities.is_empty() {
            return Err(reject("amenities", "must contain at least one known amenity"));
        }

        // Legacy fixtures sometimes put the user's display name in this
        // column, so resolution accepts either email or name.
        let user = users
            .iter()
            .find(|u| u.email == record.user_email || u.name == record.user_email)
            .cloned()
            .ok_or_else(|| RowRejection::UnknownUser {
                reference: record.user_email.clone(),
            })?;

        let comments_count = parse_i32(&record.comments_count)
            .filter(|c| *c >= 0)
            .ok_or_else(|| reject("comments_count", "must be an integer >= 0"))?;

        let location = parse_location(&record.location)?;

        Ok(OfferDraft {
            title: record.title.clone(),
            description: record.description.clone(),
            publish_date,
            city,
            preview_image: record.preview_image.clone(),
            images,
            is_premium,
            is_favorite,
            rating,
            property_type,
            rooms,
            guests,
            price,
            amenities,
            user,
            comments_count,
            location,
        })
    }
}

fn parse_location(raw: &str) -> Result<Location, RowRejection> {
    let mut parts = raw.split(' ');
    let (Some(latitude_raw), Some(longitude_raw), None) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(reject("location", "must be two space-separated floats"));
    };

    let latitude = parse_f64(latitude_raw)
        .filter(|lat| (MIN_LATITUDE..=MAX_LATITUDE).contains(lat))
        .ok_or_else(|| reject("location", "latitude must be within -90..90"))?;
    let longitude = parse_f64(longitude_raw)
        .filter(|lon| (MIN_LONGITUDE..=MAX_LONGITUDE).contains(lon))
        .ok_or_else(|| reject("location", "longitude must be within -180..180"))?;

    Ok(Location {
        latitude,
        longitude,
    })
}

fn reject(field: &'static str, message: &'static str) -> RowRejection {
    RowRejection::Field { field, message }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::domain::offer::Amenity;
    use crate::domain::user::UserType;
    use crate::tsv::RowRejection;
    use crate::tsv::record::{OfferRecord, tests::valid_line};

    use super::{ImportUser, OfferFactory};

    pub(crate) fn known_users() -> Vec<ImportUser> {
        vec![
            ImportUser {
                name: "Kirill".to_string(),
                email: "kirill@gmail.com".to_string(),
                avatar_url: Some("kirill-avatar.png".to_string()),
                password: "qwerty".to_string(),
                user_type: UserType::Pro,
            },
            ImportUser {
                name: "Sergey".to_string(),
                email: "sergey@gmail.com".to_string(),
                avatar_url: None,
                password: "rtyqwe".to_string(),
                user_type: UserType::Regular,
            },
        ]
    }

    fn valid_record() -> OfferRecord {
        OfferRecord::parse_line(&valid_line()).expect("fixture line must parse")
    }

    #[test]
    fn create_accepts_valid_record() {
        let draft = OfferFactory::create(&valid_record(), &known_users())
            .expect("valid record must be accepted");

        assert_eq!(draft.title, "Cozy loft in the old town");
        assert_eq!(draft.rating, 4.2);
        assert!(draft.is_premium);
        assert!(!draft.is_favorite);
        assert_eq!(draft.amenities, vec![Amenity::Breakfast, Amenity::Washer]);
        assert_eq!(draft.user.email, "kirill@gmail.com");
        assert_eq!(draft.location.latitude, 52.370216);
    }

    #[test]
    fn create_is_idempotent_over_reserialization() {
        let first = OfferFactory::create(&valid_record(), &known_users())
            .expect("valid record must be accepted");

        let reparsed = OfferRecord::parse_line(&first.to_tsv_line())
            .expect("serialized draft must parse again");
        let second = OfferFactory::create(&reparsed, &known_users())
            .expect("serialized draft must validate again");

        assert_eq!(first, second);
    }

    #[test]
    fn create_rejects_title_out_of_bounds() {
        for title in ["Too short", "x".repeat(101).as_str()] {
            let record = OfferRecord {
                title: title.to_string(),
                ..valid_record()
            };
            let err = OfferFactory::create(&record, &known_users())
                .expect_err("title must be rejected");
            assert!(matches!(err, RowRejection::Field { field: "title", .. }));
        }
    }

    #[test]
    fn create_rejects_wrong_image_count() {
        let record = OfferRecord {
            images: "a.jpg b.jpg".to_string(),
            ..valid_record()
        };
        let err =
            OfferFactory::create(&record, &known_users()).expect_err("images must be rejected");
        assert!(matches!(err, RowRejection::Field { field: "images", .. }));

        // Double spaces produce empty tokens, which also reject.
        let record = OfferRecord {
            images: "a.jpg  b.jpg c.jpg d.jpg e.jpg".to_string(),
            ..valid_record()
        };
        assert!(OfferFactory::create(&record, &known_users()).is_err());
    }

    #[test]
    fn create_rejects_all_unknown_amenities() {
        let record = OfferRecord {
            amenities: "Sauna,Pool table".to_string(),
            ..valid_record()
        };
        let err =
            OfferFactory::create(&record, &known_users()).expect_err("amenities must be rejected");
        assert!(matches!(err, RowRejection::Field { field: "amenities", .. }));
    }

    #[test]
    fn create_keeps_known_amenities_among_unknown_ones() {
        let record = OfferRecord {
            amenities: "Sauna, Washer ,Pool table".to_string(),
            ..valid_record()
        };
        let draft = OfferFactory::create(&record, &known_users()).expect("must be accepted");
        assert_eq!(draft.amenities, vec![Amenity::Washer]);
    }

    #[test]
    fn create_resolves_user_by_email_or_name() {
        let by_email = OfferFactory::create(&valid_record(), &known_users())
            .expect("email reference must resolve");
        assert_eq!(by_email.user.name, "Kirill");

        let record = OfferRecord {
            user_email: "Sergey".to_string(),
            ..valid_record()
        };
        let by_name =
            OfferFactory::create(&record, &known_users()).expect("name reference must resolve");
        assert_eq!(by_name.user.email, "sergey@gmail.com");

        let record = OfferRecord {
            user_email: "nobody@example.com".to_string(),
            ..valid_record()
        };
        let err = OfferFactory::create(&record, &known_users())
            .expect_err("unknown reference must be rejected");
        assert!(matches!(err, RowRejection::UnknownUser { .. }));
    }

    #[test]
    fn create_rejects_malformed_numbers_without_panicking() {
        let record = OfferRecord {
            rooms: "two".to_string(),
            ..valid_record()
        };
        assert!(OfferFactory::create(&record, &known_users()).is_err());

        let record = OfferRecord {
            price: "99".to_string(),
            ..valid_record()
        };
        assert!(OfferFactory::create(&record, &known_users()).is_err());
    }

    #[test]
    fn create_accepts_comma_decimal_rating() {
        let record = OfferRecord {
            rating: "4,5".to_string(),
            ..valid_record()
        };
        let draft = OfferFactory::create(&record, &known_users()).expect("must be accepted");
        assert_eq!(draft.rating, 4.5);
    }

    #[test]
    fn create_rejects_out_of_range_location() {
        let record = OfferRecord {
            location: "95.0 4.895168".to_string(),
            ..valid_record()
        };
        assert!(OfferFactory::create(&record, &known_users()).is_err());

        let record = OfferRecord {
            location: "52.37".to_string(),
            ..valid_record()
        };
        assert!(OfferFactory::create(&record, &known_users()).is_err());
    }
}
