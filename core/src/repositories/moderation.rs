//! Persistence contract for records carrying a moderation state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::value_objects::{ModerationGuard, ModerationState};
use crate::errors::DomainError;

/// Storage side of the moderation state machine.
///
/// Contractor and store repositories extend this trait, so the same
/// moderation engine drives both.
#[async_trait]
pub trait ModerationRepository<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, DomainError>;

    /// Conditionally persist `next`.
    ///
    /// The write happens only if the stored record still matches `expected`
    /// (status, blocked flag and, for contractors, registration step).
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The record after the update
    /// * `Ok(None)` - The record changed underneath us, or is gone
    /// * `Err(DomainError)` - Storage failure
    async fn update_moderation(
        &self,
        id: Uuid,
        expected: ModerationGuard,
        next: &ModerationState,
    ) -> Result<Option<T>, DomainError>;
}
