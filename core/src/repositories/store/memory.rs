//! In-memory implementation of StoreRepository

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::store::Store;
use crate::domain::value_objects::{ListQuery, ModerationGuard, ModerationState, Moderated};
use crate::errors::DomainError;
use crate::repositories::memory::MemoryTable;
use crate::repositories::moderation::ModerationRepository;

use super::trait_::StoreRepository;

#[derive(Default)]
pub struct InMemoryStoreRepository {
    stores: MemoryTable<Store>,
}

impl InMemoryStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModerationRepository<Store> for InMemoryStoreRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, DomainError> {
        Ok(self.stores.get(id).await)
    }

    async fn update_moderation(
        &self,
        id: Uuid,
        expected: ModerationGuard,
        next: &ModerationState,
    ) -> Result<Option<Store>, DomainError> {
        Ok(self
            .stores
            .update_if(
                id,
                |s| s.guard() == expected,
                |s| {
                    s.moderation = next.clone();
                    s.updated_at = Utc::now();
                },
            )
            .await)
    }
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn create(&self, store: Store) -> Result<Store, DomainError> {
        self.stores
            .insert_unique(store, |existing, candidate| {
                (existing.profile.email == candidate.profile.email)
                    .then(|| DomainError::conflict("A store with this email already exists"))
            })
            .await
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Store>, DomainError> {
        Ok(self.stores.page(query).await)
    }
}
