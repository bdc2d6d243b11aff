//! User service implementation

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bo_shared::utils::mask_email;
use bo_shared::Page;

use crate::domain::entities::user::User;
use crate::domain::events::{AccountKind, NotificationEvent, Recipient};
use crate::domain::value_objects::ListQuery;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::auth::{hash_password, validate_password, PasswordHasher};
use crate::services::fields;
use crate::services::notification::NotificationPublisher;

const RESOURCE: &str = "User";
const MAX_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 20;

/// Admin-created user account
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: Option<String>,
}

/// Partial profile edit. `email` is accepted only if it matches the stored one.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn NotificationPublisher>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            users,
            hasher,
            notifier,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> DomainResult<Page<User>> {
        self.users.list(query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE))
    }

    pub async fn create(&self, input: NewUser) -> DomainResult<User> {
        let name = fields::required_text("name", &input.name, MAX_NAME_LEN)?;
        let email = fields::email(&input.email)?;
        let phone = fields::required_text("phone", &input.phone, MAX_PHONE_LEN)?;

        let password_hash = match input.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => {
                validate_password(password)?;
                Some(hash_password(&self.hasher, password).await?)
            }
            None => None,
        };

        let user = self
            .users
            .create(User::new(name, email, phone, password_hash))
            .await?;
        info!(user_id = %user.id, email = %mask_email(&user.email), "User created");
        Ok(user)
    }

    pub async fn edit(&self, id: Uuid, changes: UserChanges) -> DomainResult<User> {
        let current = self.get(id).await?;

        if let Some(email) = changes.email.as_deref() {
            if fields::email(email)? != current.email {
                return Err(ValidationError::ImmutableField {
                    field: "email".to_string(),
                }
                .into());
            }
        }

        let name = match changes.name.as_deref() {
            Some(name) => fields::required_text("name", name, MAX_NAME_LEN)?,
            None => current.name,
        };
        let phone = match changes.phone.as_deref() {
            Some(phone) => fields::required_text("phone", phone, MAX_PHONE_LEN)?,
            None => current.phone,
        };

        let user = self
            .users
            .update_profile(id, &name, &phone)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE))?;
        info!(user_id = %id, "User profile updated");
        Ok(user)
    }

    pub async fn block(&self, id: Uuid) -> DomainResult<User> {
        self.set_blocked(id, true).await
    }

    pub async fn unblock(&self, id: Uuid) -> DomainResult<User> {
        self.set_blocked(id, false).await
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> DomainResult<User> {
        match self.users.set_blocked(id, blocked).await? {
            Some(user) => {
                info!(user_id = %id, blocked, "User block flag changed");
                let recipient = Recipient::new(AccountKind::User, user.email.clone(), user.name.clone());
                self.notifier.publish(if blocked {
                    NotificationEvent::Blocked { recipient }
                } else {
                    NotificationEvent::Unblocked { recipient }
                });
                Ok(user)
            }
            // Already in the requested state, or missing
            None => self.get(id).await,
        }
    }
}
