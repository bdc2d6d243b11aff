//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::user::User;
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user; `Conflict` when the email is taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update name and phone. Email is immutable.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The updated user
    /// * `Ok(None)` - User not found
    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        phone: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Set the blocked flag if it currently equals `!blocked`
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The flag was flipped
    /// * `Ok(None)` - User missing or flag already at `blocked`
    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<Option<User>, DomainError>;

    /// Paginated listing, searched over name, email and phone
    async fn list(&self, query: &ListQuery) -> Result<Page<User>, DomainError>;
}
