//! Customer testimonial shown on the marketing site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ImageAsset, Listable};
use crate::errors::ValidationError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub feedback: String,
    pub rating: u8,
    pub image: ImageAsset,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Testimonial {
    pub fn new(name: String, feedback: String, rating: u8, image: ImageAsset) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            feedback,
            rating,
            image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ratings are whole stars from 1 to 5
pub fn validate_rating(rating: i64) -> Result<u8, ValidationError> {
    if rating < i64::from(MIN_RATING) || rating > i64::from(MAX_RATING) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING.to_string(),
            max: MAX_RATING.to_string(),
        });
    }
    Ok(rating as u8)
}

impl Listable for Testimonial {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.feedback]
    }
}
