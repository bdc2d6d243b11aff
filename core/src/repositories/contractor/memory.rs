//! In-memory implementation of ContractorRepository

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::contractor::{Contractor, RegistrationStep};
use crate::domain::value_objects::{ListQuery, ModerationGuard, ModerationState, Moderated};
use crate::errors::DomainError;
use crate::repositories::memory::MemoryTable;
use crate::repositories::moderation::ModerationRepository;

use super::trait_::ContractorRepository;

#[derive(Default)]
pub struct InMemoryContractorRepository {
    contractors: MemoryTable<Contractor>,
}

impl InMemoryContractorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModerationRepository<Contractor> for InMemoryContractorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contractor>, DomainError> {
        Ok(self.contractors.get(id).await)
    }

    async fn update_moderation(
        &self,
        id: Uuid,
        expected: ModerationGuard,
        next: &ModerationState,
    ) -> Result<Option<Contractor>, DomainError> {
        Ok(self
            .contractors
            .update_if(
                id,
                |c| c.guard() == expected,
                |c| {
                    c.moderation = next.clone();
                    c.updated_at = Utc::now();
                },
            )
            .await)
    }
}

#[async_trait]
impl ContractorRepository for InMemoryContractorRepository {
    async fn create(&self, contractor: Contractor) -> Result<Contractor, DomainError> {
        self.contractors
            .insert_unique(contractor, |existing, candidate| {
                (existing.profile.email == candidate.profile.email).then(|| {
                    DomainError::conflict("A contractor with this email already exists")
                })
            })
            .await
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Contractor>, DomainError> {
        Ok(self.contractors.page(query).await)
    }

    async fn submit_documents(
        &self,
        id: Uuid,
        license_document: &str,
        gst_document: &str,
    ) -> Result<Option<Contractor>, DomainError> {
        Ok(self
            .contractors
            .update_if(
                id,
                |c| {
                    c.registration_step == RegistrationStep::One
                        && c.moderation.is_approved()
                        && !c.moderation.is_blocked
                },
                |c| {
                    c.license_document = Some(license_document.to_string());
                    c.gst_document = Some(gst_document.to_string());
                    c.registration_step = RegistrationStep::Two;
                    c.moderation = ModerationState::pending();
                    c.updated_at = Utc::now();
                },
            )
            .await)
    }
}
