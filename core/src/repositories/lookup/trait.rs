//! Lookup repository trait for job types and product types.

use async_trait::async_trait;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::lookup::{LookupEntry, LookupKind};
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;

/// Both lookup tables share one repository, partitioned by [`LookupKind`]
#[async_trait]
pub trait LookupRepository: Send + Sync {
    async fn find_by_id(
        &self,
        kind: LookupKind,
        id: Uuid,
    ) -> Result<Option<LookupEntry>, DomainError>;

    /// Persist a new entry; `Conflict` when the name exists for this kind
    async fn create(&self, entry: LookupEntry) -> Result<LookupEntry, DomainError>;

    /// Replace name and image; `Conflict` when the new name is taken
    ///
    /// # Returns
    /// * `Ok(Some(LookupEntry))` - The updated entry
    /// * `Ok(None)` - Entry not found
    async fn update(&self, entry: LookupEntry) -> Result<Option<LookupEntry>, DomainError>;

    /// Remove an entry, returning it so its image can be cleaned up
    async fn delete(
        &self,
        kind: LookupKind,
        id: Uuid,
    ) -> Result<Option<LookupEntry>, DomainError>;

    async fn list(
        &self,
        kind: LookupKind,
        query: &ListQuery,
    ) -> Result<Page<LookupEntry>, DomainError>;
}
