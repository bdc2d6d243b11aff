//! In-memory implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::user::User;
use crate::domain::value_objects::ListQuery;
use crate::errors::DomainError;
use crate::repositories::memory::MemoryTable;

use super::trait_::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: MemoryTable<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.get(id).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find(|u| u.email == email).await)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.users
            .insert_unique(user, |existing, candidate| {
                (existing.email == candidate.email)
                    .then(|| DomainError::conflict("A user with this email already exists"))
            })
            .await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        phone: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .update_if(
                id,
                |_| true,
                |u| {
                    u.name = name.to_string();
                    u.phone = phone.to_string();
                    u.updated_at = Utc::now();
                },
            )
            .await)
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .update_if(
                id,
                |u| u.is_blocked != blocked,
                |u| {
                    u.is_blocked = blocked;
                    u.updated_at = Utc::now();
                },
            )
            .await)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<User>, DomainError> {
        Ok(self.users.page(query).await)
    }
}
