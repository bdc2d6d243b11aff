//! In-memory implementation of LookupRepository

use async_trait::async_trait;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::lookup::{LookupEntry, LookupKind};
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;
use crate::repositories::memory::MemoryTable;

use super::trait_::LookupRepository;

#[derive(Default)]
pub struct InMemoryLookupRepository {
    entries: MemoryTable<LookupEntry>,
}

impl InMemoryLookupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict(existing: &LookupEntry, candidate: &LookupEntry) -> Option<DomainError> {
    (existing.kind == candidate.kind && existing.has_name(&candidate.name)).then(|| {
        DomainError::conflict(format!(
            "{} '{}' already exists",
            candidate.kind.label(),
            candidate.name
        ))
    })
}

#[async_trait]
impl LookupRepository for InMemoryLookupRepository {
    async fn find_by_id(
        &self,
        kind: LookupKind,
        id: Uuid,
    ) -> Result<Option<LookupEntry>, DomainError> {
        Ok(self.entries.get(id).await.filter(|e| e.kind == kind))
    }

    async fn create(&self, entry: LookupEntry) -> Result<LookupEntry, DomainError> {
        self.entries.insert_unique(entry, conflict).await
    }

    async fn update(&self, entry: LookupEntry) -> Result<Option<LookupEntry>, DomainError> {
        self.entries.replace_unique(entry, conflict).await
    }

    async fn delete(
        &self,
        kind: LookupKind,
        id: Uuid,
    ) -> Result<Option<LookupEntry>, DomainError> {
        Ok(self.entries.remove_if(id, |e| e.kind == kind).await)
    }

    async fn list(
        &self,
        kind: LookupKind,
        query: &ListQuery,
    ) -> Result<Page<LookupEntry>, DomainError> {
        Ok(self.entries.page_where(query, |e| e.kind == kind).await)
    }
}
