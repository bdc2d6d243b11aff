//! Moderation engine shared by contractor and store services.
//!
//! Each action is read, computed with [`ModerationState::apply`], then
//! written with a compare-and-set on the state that was read. A lost race
//! re-reads and recomputes, up to [`MAX_CAS_ATTEMPTS`] times.
//!
//! [`ModerationState::apply`]: crate::domain::value_objects::ModerationState::apply

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::events::{NotificationEvent, Recipient};
use crate::domain::value_objects::{ModerationAction, Moderated, Transition};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ModerationRepository;

#[cfg(test)]
mod tests;

pub const MAX_CAS_ATTEMPTS: usize = 3;

/// Record after a moderation action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationOutcome<T> {
    pub entity: T,
    /// False when the action was an idempotent repeat
    pub changed: bool,
}

/// Apply `action` to the record `id`.
///
/// `precondition` runs against every fresh read, before the transition is
/// computed, and can veto the action (contractor step gating).
pub async fn moderate<T, R, P>(
    repo: &R,
    resource: &str,
    id: Uuid,
    action: &ModerationAction,
    precondition: P,
) -> DomainResult<ModerationOutcome<T>>
where
    T: Moderated + Send + Sync + 'static,
    R: ModerationRepository<T> + ?Sized,
    P: Fn(&T) -> DomainResult<()>,
{
    for attempt in 1..=MAX_CAS_ATTEMPTS {
        let entity = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(resource))?;
        precondition(&entity)?;

        let next = match entity.moderation().apply(action, Utc::now())? {
            Transition::Unchanged => {
                return Ok(ModerationOutcome {
                    entity,
                    changed: false,
                })
            }
            Transition::Changed(next) => next,
        };

        if let Some(updated) = repo.update_moderation(id, entity.guard(), &next).await? {
            return Ok(ModerationOutcome {
                entity: updated,
                changed: true,
            });
        }
        debug!(%id, resource, attempt, action = action.name(), "Moderation write lost a race");
    }

    Err(DomainError::ConcurrentModification {
        resource: resource.to_string(),
    })
}

/// Notification for a successful transition; reopening is silent
pub fn notification_for<T: Moderated>(
    action: &ModerationAction,
    recipient: Recipient,
    step: Option<u8>,
    entity: &T,
) -> Option<NotificationEvent> {
    match action {
        ModerationAction::Approve => Some(NotificationEvent::Approved { recipient, step }),
        ModerationAction::Reject { .. } => Some(NotificationEvent::Rejected {
            recipient,
            step,
            reason: entity
                .moderation()
                .rejection_reason
                .clone()
                .unwrap_or_default(),
        }),
        ModerationAction::Block => Some(NotificationEvent::Blocked { recipient }),
        ModerationAction::Unblock => Some(NotificationEvent::Unblocked { recipient }),
        ModerationAction::Reopen => None,
    }
}
