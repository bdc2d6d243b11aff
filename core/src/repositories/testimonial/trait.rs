//! Testimonial repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::testimonial::Testimonial;
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;

#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Testimonial>, DomainError>;

    async fn create(&self, testimonial: Testimonial) -> Result<Testimonial, DomainError>;

    /// # Returns
    /// * `Ok(Some(Testimonial))` - The updated testimonial
    /// * `Ok(None)` - Testimonial not found
    async fn update(&self, testimonial: Testimonial)
        -> Result<Option<Testimonial>, DomainError>;

    /// Remove a testimonial, returning it so its image can be cleaned up
    async fn delete(&self, id: Uuid) -> Result<Option<Testimonial>, DomainError>;

    async fn list(&self, query: &ListQuery) -> Result<Page<Testimonial>, DomainError>;
}
