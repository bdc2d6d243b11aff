//! Testimonial service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::testimonial::{validate_rating, Testimonial};
use crate::domain::value_objects::ListQuery;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::TestimonialRepository;
use crate::services::fields;
use crate::services::storage::{discard, AssetStorage, ImageUpload};

const RESOURCE: &str = "Testimonial";
const FOLDER: &str = "testimonials";
const MAX_NAME_LEN: usize = 100;
const MAX_FEEDBACK_LEN: usize = 2000;

#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub name: String,
    pub feedback: String,
    /// Raw client value, validated to 1..=5
    pub rating: i64,
}

#[derive(Debug, Clone, Default)]
pub struct TestimonialChanges {
    pub name: Option<String>,
    pub feedback: Option<String>,
    pub rating: Option<i64>,
}

pub struct TestimonialService {
    testimonials: Arc<dyn TestimonialRepository>,
    storage: Arc<dyn AssetStorage>,
    max_upload_bytes: usize,
}

impl TestimonialService {
    pub fn new(
        testimonials: Arc<dyn TestimonialRepository>,
        storage: Arc<dyn AssetStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            testimonials,
            storage,
            max_upload_bytes,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> DomainResult<Page<Testimonial>> {
        self.testimonials.list(query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Testimonial> {
        self.testimonials
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE))
    }

    pub async fn create(
        &self,
        input: NewTestimonial,
        image: ImageUpload,
    ) -> DomainResult<Testimonial> {
        let name = fields::required_text("name", &input.name, MAX_NAME_LEN)?;
        let feedback = fields::required_text("feedback", &input.feedback, MAX_FEEDBACK_LEN)?;
        let rating = validate_rating(input.rating)?;
        image.validate(self.max_upload_bytes)?;

        let asset = self.storage.store(FOLDER, image).await?;
        let public_id = asset.public_id.clone();

        match self
            .testimonials
            .create(Testimonial::new(name, feedback, rating, asset))
            .await
        {
            Ok(testimonial) => {
                info!(testimonial_id = %testimonial.id, rating, "Testimonial created");
                Ok(testimonial)
            }
            Err(e) => {
                discard(self.storage.as_ref(), &public_id).await;
                Err(e)
            }
        }
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: TestimonialChanges,
        image: Option<ImageUpload>,
    ) -> DomainResult<Testimonial> {
        let mut testimonial = self.get(id).await?;
        if let Some(name) = changes.name.as_deref() {
            testimonial.name = fields::required_text("name", name, MAX_NAME_LEN)?;
        }
        if let Some(feedback) = changes.feedback.as_deref() {
            testimonial.feedback = fields::required_text("feedback", feedback, MAX_FEEDBACK_LEN)?;
        }
        if let Some(rating) = changes.rating {
            testimonial.rating = validate_rating(rating)?;
        }
        if let Some(image) = &image {
            image.validate(self.max_upload_bytes)?;
        }

        let previous = testimonial.image.clone();
        let replaced = match image {
            Some(image) => {
                testimonial.image = self.storage.store(FOLDER, image).await?;
                true
            }
            None => false,
        };
        testimonial.updated_at = Utc::now();
        let new_public_id = testimonial.image.public_id.clone();

        let result = self.testimonials.update(testimonial).await;
        let updated = match result {
            Ok(Some(updated)) => updated,
            other => {
                if replaced {
                    discard(self.storage.as_ref(), &new_public_id).await;
                }
                return match other {
                    Err(e) => Err(e),
                    _ => Err(DomainError::not_found(RESOURCE)),
                };
            }
        };

        if replaced {
            discard(self.storage.as_ref(), &previous.public_id).await;
        }
        info!(testimonial_id = %id, image_replaced = replaced, "Testimonial updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<Testimonial> {
        let testimonial = self
            .testimonials
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE))?;
        discard(self.storage.as_ref(), &testimonial.image.public_id).await;
        info!(testimonial_id = %id, "Testimonial deleted");
        Ok(testimonial)
    }
}
