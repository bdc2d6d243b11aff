//! Contractor repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::contractor::Contractor;
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;
use crate::repositories::moderation::ModerationRepository;

/// Repository trait for Contractor persistence.
///
/// Lookups by ID and moderation writes come from [`ModerationRepository`].
#[async_trait]
pub trait ContractorRepository: ModerationRepository<Contractor> {
    /// Persist a newly registered contractor
    async fn create(&self, contractor: Contractor) -> Result<Contractor, DomainError>;

    /// Paginated listing, searched over company name, contractor name,
    /// email and phone. Step and status filters come from the query.
    async fn list(&self, query: &ListQuery) -> Result<Page<Contractor>, DomainError>;

    /// Attach step two documents and reopen review.
    ///
    /// Applies only to an unblocked contractor whose step one is approved;
    /// moves it to step two in `Pending`.
    ///
    /// # Returns
    /// * `Ok(Some(Contractor))` - Documents recorded
    /// * `Ok(None)` - Contractor missing or not eligible
    async fn submit_documents(
        &self,
        id: Uuid,
        license_document: &str,
        gst_document: &str,
    ) -> Result<Option<Contractor>, DomainError>;
}
