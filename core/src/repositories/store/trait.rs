//! Store repository trait.

use async_trait::async_trait;

use bo_shared::Page;

use crate::domain::entities::store::Store;
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;
use crate::repositories::moderation::ModerationRepository;

/// Repository trait for Store persistence
#[async_trait]
pub trait StoreRepository: ModerationRepository<Store> {
    async fn create(&self, store: Store) -> Result<Store, DomainError>;

    /// Paginated listing, searched over store name, owner name, email and phone
    async fn list(&self, query: &ListQuery) -> Result<Page<Store>, DomainError>;
}
