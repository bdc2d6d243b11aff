//! Compare-and-set behaviour of the moderation engine

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::store::{Store, StoreProfile};
use crate::domain::events::{AccountKind, NotificationEvent, Recipient};
use crate::domain::value_objects::{
    ApprovalStatus, ModerationAction, ModerationGuard, ModerationState, Moderated,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{InMemoryStoreRepository, ModerationRepository, StoreRepository};
use crate::services::moderation::{moderate, notification_for, MAX_CAS_ATTEMPTS};

/// Loses the first `losses` writes. Before each lost write it can apply a
/// competing state, as another admin would.
struct RacingRepository {
    inner: InMemoryStoreRepository,
    losses: AtomicUsize,
    competing: Option<ModerationState>,
}

impl RacingRepository {
    fn new(losses: usize, competing: Option<ModerationState>) -> Self {
        Self {
            inner: InMemoryStoreRepository::new(),
            losses: AtomicUsize::new(losses),
            competing,
        }
    }
}

#[async_trait]
impl ModerationRepository<Store> for RacingRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Store>> {
        self.inner.find_by_id(id).await
    }

    async fn update_moderation(
        &self,
        id: Uuid,
        expected: ModerationGuard,
        next: &ModerationState,
    ) -> DomainResult<Option<Store>> {
        let remaining = self.losses.load(Ordering::SeqCst);
        if remaining > 0 {
            self.losses.store(remaining - 1, Ordering::SeqCst);
            if let Some(competing) = &self.competing {
                self.inner.update_moderation(id, expected, competing).await?;
            }
            return Ok(None);
        }
        self.inner.update_moderation(id, expected, next).await
    }
}

fn store() -> Store {
    Store::new(StoreProfile {
        store_name: "Corner Hardware".to_string(),
        owner_name: "Sam".to_string(),
        email: "sam@corner.test".to_string(),
        ..StoreProfile::default()
    })
}

fn allow(_: &Store) -> DomainResult<()> {
    Ok(())
}

#[tokio::test]
async fn test_approve_then_repeat_is_unchanged() {
    let repo = InMemoryStoreRepository::new();
    let created = repo.create(store()).await.unwrap();

    let first = moderate(&repo, "Store", created.id, &ModerationAction::Approve, allow)
        .await
        .unwrap();
    assert!(first.changed);
    assert_eq!(first.entity.moderation.approval_status, ApprovalStatus::Approved);

    let second = moderate(&repo, "Store", created.id, &ModerationAction::Approve, allow)
        .await
        .unwrap();
    assert!(!second.changed);
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let repo = InMemoryStoreRepository::new();
    let err = moderate(&repo, "Store", Uuid::new_v4(), &ModerationAction::Approve, allow)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found("Store"));
}

#[tokio::test]
async fn test_retries_after_lost_race() {
    let repo = RacingRepository::new(MAX_CAS_ATTEMPTS - 1, None);
    let created = repo.inner.create(store()).await.unwrap();

    let outcome = moderate(&repo, "Store", created.id, &ModerationAction::Approve, allow)
        .await
        .unwrap();
    assert!(outcome.changed);
}

#[tokio::test]
async fn test_gives_up_after_bounded_retries() {
    let repo = RacingRepository::new(MAX_CAS_ATTEMPTS, None);
    let created = repo.inner.create(store()).await.unwrap();

    let err = moderate(&repo, "Store", created.id, &ModerationAction::Approve, allow)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ConcurrentModification { .. }));
    let stored = repo.inner.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.moderation.approval_status, ApprovalStatus::Pending);
}

#[tokio::test]
async fn test_recomputes_against_competing_write() {
    let mut rejected = ModerationState::pending();
    rejected.approval_status = ApprovalStatus::Rejected;
    rejected.rejection_reason = Some("Duplicate listing".to_string());
    let repo = RacingRepository::new(1, Some(rejected));
    let created = repo.inner.create(store()).await.unwrap();

    // The competing reject lands first, so approving is no longer legal
    let err = moderate(&repo, "Store", created.id, &ModerationAction::Approve, allow)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_stale_guard_loses_to_reject_reopen_reject() {
    let repo = InMemoryStoreRepository::new();
    let created = repo.create(store()).await.unwrap();
    let first = moderate(&repo, "Store", created.id, &ModerationAction::reject("Old reason"), allow)
        .await
        .unwrap();
    let stale = first.entity.clone();

    for action in [ModerationAction::Reopen, ModerationAction::reject("New reason")] {
        moderate(&repo, "Store", created.id, &action, allow).await.unwrap();
    }

    // A block computed from the first rejection must not land
    let mut blocked = stale.moderation.clone();
    blocked.is_blocked = true;
    let written = repo
        .update_moderation(created.id, stale.guard(), &blocked)
        .await
        .unwrap();
    assert!(written.is_none());

    let outcome = moderate(&repo, "Store", created.id, &ModerationAction::Block, allow)
        .await
        .unwrap();
    assert!(outcome.entity.moderation.is_blocked);
    assert_eq!(
        outcome.entity.moderation.rejection_reason.as_deref(),
        Some("New reason")
    );
}

#[tokio::test]
async fn test_precondition_vetoes_before_write() {
    let repo = InMemoryStoreRepository::new();
    let created = repo.create(store()).await.unwrap();

    let err = moderate(&repo, "Store", created.id, &ModerationAction::Approve, |_: &Store| {
        Err(DomainError::validation("not yet"))
    })
    .await
    .unwrap_err();
    assert_eq!(err, DomainError::validation("not yet"));

    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert!(stored.moderation().is_pending());
}

#[test]
fn test_notification_for_reject_carries_reason() {
    let mut entity = store();
    entity.moderation.approval_status = ApprovalStatus::Rejected;
    entity.moderation.rejection_reason = Some("Incomplete documents".to_string());
    let recipient = Recipient::new(AccountKind::Store, "sam@corner.test", "Sam");

    let event = notification_for(
        &ModerationAction::reject("Incomplete documents"),
        recipient.clone(),
        None,
        &entity,
    );
    assert_eq!(
        event,
        Some(NotificationEvent::Rejected {
            recipient: recipient.clone(),
            step: None,
            reason: "Incomplete documents".to_string(),
        })
    );
    assert!(notification_for(&ModerationAction::Reopen, recipient, None, &entity).is_none());
}
