//! In-memory implementation of AdminRepository

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::admin::{Admin, AdminRole, AdminUpdate};
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;
use crate::repositories::memory::MemoryTable;

use super::trait_::AdminRepository;

/// Admin repository held in process memory
#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: MemoryTable<Admin>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict(existing: &Admin, candidate: &Admin) -> Option<DomainError> {
    if existing.email == candidate.email {
        return Some(DomainError::conflict("An admin with this email already exists"));
    }
    if existing.unique_id == candidate.unique_id {
        return Some(DomainError::conflict("An admin with this unique ID already exists"));
    }
    None
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, DomainError> {
        Ok(self.admins.get(id).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        Ok(self.admins.find(|a| a.email == email).await)
    }

    async fn create(&self, admin: Admin) -> Result<Admin, DomainError> {
        self.admins.insert_unique(admin, conflict).await
    }

    async fn update(
        &self,
        id: Uuid,
        expected_role: AdminRole,
        changes: AdminUpdate,
    ) -> Result<Option<Admin>, DomainError> {
        Ok(self
            .admins
            .update_if(
                id,
                |stored| stored.role == expected_role,
                |stored| {
                    if let Some(fullname) = changes.fullname {
                        stored.fullname = fullname;
                    }
                    if let Some(role) = changes.role {
                        stored.role = role;
                    }
                    if let Some(hash) = changes.password_hash {
                        stored.password_hash = Some(hash);
                    }
                    stored.updated_at = Utc::now();
                },
            )
            .await)
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<Option<Admin>, DomainError> {
        Ok(self
            .admins
            .update_if(
                id,
                |a| a.is_blocked != blocked,
                |a| {
                    a.is_blocked = blocked;
                    a.updated_at = Utc::now();
                },
            )
            .await)
    }

    async fn replace_password(
        &self,
        id: Uuid,
        expected: Option<&str>,
        new_hash: &str,
    ) -> Result<bool, DomainError> {
        Ok(self
            .admins
            .update_if(
                id,
                |a| a.password_hash.as_deref() == expected,
                |a| {
                    a.password_hash = Some(new_hash.to_string());
                    a.updated_at = Utc::now();
                },
            )
            .await
            .is_some())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self
            .admins
            .remove_if(id, |a| a.role != AdminRole::Superadmin)
            .await
            .is_some())
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Admin>, DomainError> {
        Ok(self.admins.page(query).await)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.admins.len().await as u64)
    }
}
