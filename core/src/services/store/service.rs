//! Store service implementation

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::store::Store;
use crate::domain::events::{AccountKind, Recipient};
use crate::domain::value_objects::{ListQuery, ModerationAction};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::StoreRepository;
use crate::services::moderation::{moderate, notification_for};
use crate::services::notification::NotificationPublisher;

const RESOURCE: &str = "Store";

/// Lists stores and drives their moderation
pub struct StoreService {
    stores: Arc<dyn StoreRepository>,
    notifier: Arc<dyn NotificationPublisher>,
}

impl StoreService {
    pub fn new(stores: Arc<dyn StoreRepository>, notifier: Arc<dyn NotificationPublisher>) -> Self {
        Self { stores, notifier }
    }

    pub async fn list(&self, query: &ListQuery) -> DomainResult<Page<Store>> {
        self.stores.list(query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Store> {
        self.stores
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE))
    }

    pub async fn approve(&self, id: Uuid) -> DomainResult<Store> {
        self.apply(id, ModerationAction::Approve).await
    }

    pub async fn reject(&self, id: Uuid, reason: &str) -> DomainResult<Store> {
        self.apply(id, ModerationAction::reject(reason)).await
    }

    pub async fn block(&self, id: Uuid) -> DomainResult<Store> {
        self.apply(id, ModerationAction::Block).await
    }

    pub async fn unblock(&self, id: Uuid) -> DomainResult<Store> {
        self.apply(id, ModerationAction::Unblock).await
    }

    /// Send a rejected store back to the review queue
    pub async fn reopen(&self, id: Uuid) -> DomainResult<Store> {
        self.apply(id, ModerationAction::Reopen).await
    }

    async fn apply(&self, id: Uuid, action: ModerationAction) -> DomainResult<Store> {
        let outcome = moderate(&*self.stores, RESOURCE, id, &action, |_: &Store| Ok(())).await?;
        let store = outcome.entity;

        if outcome.changed {
            info!(
                store_id = %store.id,
                action = action.name(),
                status = %store.moderation.approval_status,
                blocked = store.moderation.is_blocked,
                "Store moderated"
            );
            let recipient = Recipient::new(
                AccountKind::Store,
                store.profile.email.clone(),
                store.profile.owner_name.clone(),
            );
            if let Some(event) = notification_for(&action, recipient, None, &store) {
                self.notifier.publish(event);
            }
        }

        Ok(store)
    }
}
