//! In-memory implementation of TestimonialRepository

use async_trait::async_trait;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::testimonial::Testimonial;
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;
use crate::repositories::memory::MemoryTable;

use super::trait_::TestimonialRepository;

#[derive(Default)]
pub struct InMemoryTestimonialRepository {
    testimonials: MemoryTable<Testimonial>,
}

impl InMemoryTestimonialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TestimonialRepository for InMemoryTestimonialRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Testimonial>, DomainError> {
        Ok(self.testimonials.get(id).await)
    }

    async fn create(&self, testimonial: Testimonial) -> Result<Testimonial, DomainError> {
        self.testimonials
            .insert_unique(testimonial, |_, _| None)
            .await
    }

    async fn update(
        &self,
        testimonial: Testimonial,
    ) -> Result<Option<Testimonial>, DomainError> {
        self.testimonials
            .replace_unique(testimonial, |_, _| None)
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Testimonial>, DomainError> {
        Ok(self.testimonials.remove(id).await)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Testimonial>, DomainError> {
        Ok(self.testimonials.page(query).await)
    }
}
