use super::RowRejection;

/// Columns of the canonical row format, in order.
pub const COLUMN_COUNT: usize = 17;

/// One line split into named positional fields. Everything is still a raw
/// string here; coercion and validation happen in the factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferRecord {
    pub title: String,
    pub description: String,
    pub publish_date: String,
    pub city: String,
    pub preview_image: String,
    pub images: String,
    pub is_premium: String,
    pub is_favorite: String,
    pub rating: String,
    pub property_type: String,
    pub rooms: String,
    pub guests: String,
    pub price: String,
    pub amenities: String,
    pub user_email: String,
    pub comments_count: String,
    pub location: String,
}

impl OfferRecord {
    /// Splits a trimmed line on horizontal tabs. Any column count other
    /// than [`COLUMN_COUNT`] is a structural rejection.
    pub fn parse_line(line: &str) -> Result<Self, RowRejection> {
        let columns: Vec<&str> = line.trim().split('\t').collect();
        if columns.len() != COLUMN_COUNT {
            return Err(RowRejection::ColumnCount {
                expected: COLUMN_COUNT,
                found: columns.len(),
            });
        }

        Ok(Self {
            title: columns[0].to_string(),
            description: columns[1].to_string(),
            publish_date: columns[2].to_string(),
            city: columns[3].to_string(),
            preview_image: columns[4].to_string(),
            images: columns[5].to_string(),
            is_premium: columns[6].to_string(),
            is_favorite: columns[7].to_string(),
            rating: columns[8].to_string(),
            property_type: columns[9].to_string(),
            rooms: columns[10].to_string(),
            guests: columns[11].to_string(),
            price: columns[12].to_string(),
            amenities: columns[13].to_string(),
            user_email: columns[14].to_string(),
            comments_count: columns[15].to_string(),
            location: columns[16].to_string(),
        })
    }
}
