//! Admin repository trait defining the interface for admin persistence.
//!
//! The trait is async-first; implementations live in this crate (in-memory)
//! and in the infrastructure crate (MySQL).

use async_trait::async_trait;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::admin::{Admin, AdminRole, AdminUpdate};
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;

/// Repository trait for Admin entity persistence operations
///
/// Emails are stored lower-cased; callers normalize before lookups.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find an admin by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Admin))` - Admin found
    /// * `Ok(None)` - No admin with that ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, DomainError>;

    /// Find an admin by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError>;

    /// Persist a new admin
    ///
    /// # Returns
    /// * `Ok(Admin)` - The created admin
    /// * `Err(DomainError::Conflict)` - Email or unique ID already taken
    /// * `Err(DomainError)` - Database error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use bo_core::repositories::AdminRepository;
    /// # use bo_core::domain::entities::admin::{Admin, AdminRole};
    /// # async fn example(repo: &impl AdminRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let admin = Admin::new(
    ///     "Jane Doe".to_string(),
    ///     "jane@example.com".to_string(),
    ///     "ADM-001".to_string(),
    ///     AdminRole::Admin,
    ///     None,
    /// );
    /// let created = repo.create(admin).await?;
    /// println!("Created admin {}", created.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn create(&self, admin: Admin) -> Result<Admin, DomainError>;

    /// Write the fields set in `changes`, only while the stored role is
    /// still `expected_role`
    ///
    /// # Returns
    /// * `Ok(Some(Admin))` - The updated admin
    /// * `Ok(None)` - Admin not found or its role changed since it was read
    async fn update(
        &self,
        id: Uuid,
        expected_role: AdminRole,
        changes: AdminUpdate,
    ) -> Result<Option<Admin>, DomainError>;

    /// Set the blocked flag if it currently equals `!blocked`
    ///
    /// # Returns
    /// * `Ok(Some(Admin))` - The flag was flipped
    /// * `Ok(None)` - Admin missing or flag already at `blocked`
    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<Option<Admin>, DomainError>;

    /// Replace the password hash if the stored one still equals `expected`
    ///
    /// # Returns
    /// * `Ok(true)` - Password replaced
    /// * `Ok(false)` - Admin missing or password changed since `expected` was read
    async fn replace_password(
        &self,
        id: Uuid,
        expected: Option<&str>,
        new_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Delete a non-superadmin account
    ///
    /// # Returns
    /// * `Ok(true)` - Admin deleted
    /// * `Ok(false)` - Admin not found or is a superadmin
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Paginated listing, searched over fullname, email and unique ID
    async fn list(&self, query: &ListQuery) -> Result<Page<Admin>, DomainError>;

    /// Total number of admins
    async fn count(&self) -> Result<u64, DomainError>;
}
