//! Admin service implementation

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use bo_shared::utils::mask_email;
use bo_shared::{BootstrapConfig, Page};

use crate::domain::entities::admin::{Admin, AdminRole, AdminUpdate};
use crate::domain::events::{AccountKind, NotificationEvent, Recipient};
use crate::domain::value_objects::ListQuery;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::AdminRepository;
use crate::services::auth::{hash_password, validate_password, PasswordHasher};
use crate::services::fields;
use crate::services::notification::NotificationPublisher;
use crate::services::token::TokenService;

const RESOURCE: &str = "Admin";
const MAX_FULLNAME_LEN: usize = 100;
const MAX_UNIQUE_ID_LEN: usize = 50;

/// Input for creating an admin
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub fullname: String,
    pub email: String,
    /// Optional; the invitee can always choose one through the setup link
    pub password: Option<String>,
    pub role: AdminRole,
    pub unique_id: String,
}

/// Partial edit of an admin
#[derive(Debug, Clone, Default)]
pub struct AdminChanges {
    pub fullname: Option<String>,
    /// Must match the stored email if present
    pub email: Option<String>,
    pub role: Option<AdminRole>,
    pub password: Option<String>,
}

pub struct AdminService {
    admins: Arc<dyn AdminRepository>,
    tokens: Arc<TokenService>,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn NotificationPublisher>,
    password_setup_url: String,
}

impl AdminService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        tokens: Arc<TokenService>,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn NotificationPublisher>,
        password_setup_url: impl Into<String>,
    ) -> Self {
        Self {
            admins,
            tokens,
            hasher,
            notifier,
            password_setup_url: password_setup_url.into(),
        }
    }

    pub async fn list(&self, query: &ListQuery) -> DomainResult<Page<Admin>> {
        self.admins.list(query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Admin> {
        self.admins
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE))
    }

    /// Create an admin and email them a password setup link
    pub async fn add_admin(&self, actor: &Admin, input: NewAdmin) -> DomainResult<Admin> {
        if input.role == AdminRole::Superadmin && !actor.is_superadmin() {
            return Err(AuthError::InsufficientPermissions.into());
        }

        let fullname = fields::required_text("fullname", &input.fullname, MAX_FULLNAME_LEN)?;
        let email = fields::email(&input.email)?;
        let unique_id = fields::required_text("uniqueId", &input.unique_id, MAX_UNIQUE_ID_LEN)?;
        let password_hash = self.hash_optional(input.password.as_deref()).await?;

        let admin = self
            .admins
            .create(Admin::new(fullname, email, unique_id, input.role, password_hash))
            .await?;
        info!(
            admin_id = %admin.id,
            created_by = %actor.id,
            role = %admin.role,
            email = %mask_email(&admin.email),
            "Admin created"
        );

        self.send_invite(&admin)?;
        Ok(admin)
    }

    /// Apply a partial edit. Only fields that were given are written, and the
    /// write fails with `ConcurrentModification` if the role changed meanwhile.
    pub async fn edit_admin(
        &self,
        actor: &Admin,
        id: Uuid,
        changes: AdminChanges,
    ) -> DomainResult<Admin> {
        let admin = self.get(id).await?;

        if admin.is_superadmin() && !actor.is_superadmin() {
            return Err(AuthError::InsufficientPermissions.into());
        }
        if let Some(email) = changes.email.as_deref() {
            if fields::email(email)? != admin.email {
                return Err(ValidationError::ImmutableField {
                    field: "email".to_string(),
                }
                .into());
            }
        }

        let mut update = AdminUpdate::default();
        if let Some(role) = changes.role.filter(|role| *role != admin.role) {
            if !actor.is_superadmin() {
                return Err(AuthError::InsufficientPermissions.into());
            }
            update.role = Some(role);
        }
        if let Some(fullname) = changes.fullname.as_deref() {
            update.fullname = Some(fields::required_text("fullname", fullname, MAX_FULLNAME_LEN)?);
        }
        update.password_hash = self.hash_optional(changes.password.as_deref()).await?;

        if update.is_empty() {
            return Ok(admin);
        }

        match self.admins.update(id, admin.role, update).await? {
            Some(updated) => {
                info!(admin_id = %id, edited_by = %actor.id, "Admin updated");
                Ok(updated)
            }
            None => match self.admins.find_by_id(id).await? {
                Some(_) => Err(DomainError::ConcurrentModification {
                    resource: RESOURCE.to_string(),
                }),
                None => Err(DomainError::not_found(RESOURCE)),
            },
        }
    }

    pub async fn block_admin(&self, actor: &Admin, id: Uuid) -> DomainResult<Admin> {
        let admin = self.get(id).await?;
        if admin.is_superadmin() {
            return Err(AuthError::SuperadminProtected {
                action: "blocked".to_string(),
            }
            .into());
        }
        if admin.id == actor.id {
            return Err(DomainError::validation("You cannot block your own account"));
        }
        self.set_blocked(admin, true).await
    }

    pub async fn unblock_admin(&self, id: Uuid) -> DomainResult<Admin> {
        let admin = self.get(id).await?;
        self.set_blocked(admin, false).await
    }

    pub async fn delete_admin(&self, actor: &Admin, id: Uuid) -> DomainResult<()> {
        let admin = self.get(id).await?;
        if admin.is_superadmin() {
            return Err(AuthError::SuperadminProtected {
                action: "deleted".to_string(),
            }
            .into());
        }
        if !self.admins.delete(id).await? {
            // Deleted or promoted since we read it
            return match self.admins.find_by_id(id).await? {
                Some(_) => Err(AuthError::SuperadminProtected {
                    action: "deleted".to_string(),
                }
                .into()),
                None => Err(DomainError::not_found(RESOURCE)),
            };
        }
        info!(admin_id = %id, deleted_by = %actor.id, "Admin deleted");
        Ok(())
    }

    /// Create the first superadmin when no admin exists yet
    pub async fn bootstrap(&self, config: &BootstrapConfig) -> DomainResult<Option<Admin>> {
        if self.admins.count().await? > 0 {
            return Ok(None);
        }

        let fullname = fields::required_text("fullname", &config.fullname, MAX_FULLNAME_LEN)?;
        let email = fields::email(&config.email)?;
        let unique_id = fields::required_text("uniqueId", &config.unique_id, MAX_UNIQUE_ID_LEN)?;
        validate_password(&config.password)?;
        let password_hash = hash_password(&self.hasher, &config.password).await?;

        let admin = self
            .admins
            .create(Admin::new(
                fullname,
                email,
                unique_id,
                AdminRole::Superadmin,
                Some(password_hash),
            ))
            .await?;
        warn!(admin_id = %admin.id, email = %mask_email(&admin.email), "Bootstrapped superadmin account");
        Ok(Some(admin))
    }

    async fn set_blocked(&self, admin: Admin, blocked: bool) -> DomainResult<Admin> {
        match self.admins.set_blocked(admin.id, blocked).await? {
            Some(updated) => {
                info!(admin_id = %updated.id, blocked, "Admin block flag changed");
                let recipient = Recipient::new(
                    AccountKind::Admin,
                    updated.email.clone(),
                    updated.fullname.clone(),
                );
                self.notifier.publish(if blocked {
                    NotificationEvent::Blocked { recipient }
                } else {
                    NotificationEvent::Unblocked { recipient }
                });
                Ok(updated)
            }
            None => self.get(admin.id).await,
        }
    }

    async fn hash_optional(&self, password: Option<&str>) -> DomainResult<Option<String>> {
        match password.filter(|p| !p.is_empty()) {
            Some(password) => {
                validate_password(password)?;
                Ok(Some(hash_password(&self.hasher, password).await?))
            }
            None => Ok(None),
        }
    }

    fn send_invite(&self, admin: &Admin) -> DomainResult<()> {
        let token = self.tokens.issue_password_setup(admin)?;
        let separator = if self.password_setup_url.contains('?') { '&' } else { '?' };
        let setup_url = format!("{}{}token={}", self.password_setup_url, separator, token);

        self.notifier.publish(NotificationEvent::AdminInvited {
            recipient: Recipient::new(AccountKind::Admin, admin.email.clone(), admin.fullname.clone()),
            setup_url,
        });
        Ok(())
    }
}
