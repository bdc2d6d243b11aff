//! Contractor service implementation

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bo_shared::Page;

use crate::domain::entities::contractor::{Contractor, RegistrationStep};
use crate::domain::events::{AccountKind, Recipient};
use crate::domain::value_objects::{ApprovalStatus, ListQuery, ModerationAction};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ContractorRepository;
use crate::services::fields;
use crate::services::moderation::{moderate, notification_for};
use crate::services::notification::NotificationPublisher;

const RESOURCE: &str = "Contractor";

pub struct ContractorService {
    contractors: Arc<dyn ContractorRepository>,
    notifier: Arc<dyn NotificationPublisher>,
}

impl ContractorService {
    pub fn new(
        contractors: Arc<dyn ContractorRepository>,
        notifier: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            contractors,
            notifier,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> DomainResult<Page<Contractor>> {
        self.contractors.list(query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Contractor> {
        self.contractors
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(RESOURCE))
    }

    /// Review queue for `step`: Pending contractors at that step unless the
    /// query names a status of its own
    pub async fn list_requests(
        &self,
        step: RegistrationStep,
        query: ListQuery,
    ) -> DomainResult<Page<Contractor>> {
        let mut filter = query.filter.clone().with_step(step.as_u8());
        if filter.status.is_none() {
            filter = filter.with_status(ApprovalStatus::Pending);
        }
        self.contractors.list(&query.with_filter(filter)).await
    }

    pub async fn approve_step(&self, step: RegistrationStep, id: Uuid) -> DomainResult<Contractor> {
        self.apply(id, ModerationAction::Approve, Some(step)).await
    }

    pub async fn reject_step(
        &self,
        step: RegistrationStep,
        id: Uuid,
        reason: &str,
    ) -> DomainResult<Contractor> {
        self.apply(id, ModerationAction::reject(reason), Some(step))
            .await
    }

    pub async fn block(&self, id: Uuid) -> DomainResult<Contractor> {
        self.apply(id, ModerationAction::Block, None).await
    }

    pub async fn unblock(&self, id: Uuid) -> DomainResult<Contractor> {
        self.apply(id, ModerationAction::Unblock, None).await
    }

    /// Send a rejected contractor back to review at its current step
    pub async fn reopen(&self, id: Uuid) -> DomainResult<Contractor> {
        self.apply(id, ModerationAction::Reopen, None).await
    }

    /// Record step two documents; only valid once step one is approved
    pub async fn submit_documents(
        &self,
        id: Uuid,
        license_document: &str,
        gst_document: &str,
    ) -> DomainResult<Contractor> {
        let license_document = fields::url("licenseDocument", license_document)?;
        let gst_document = fields::url("gstDocument", gst_document)?;

        if let Some(contractor) = self
            .contractors
            .submit_documents(id, &license_document, &gst_document)
            .await?
        {
            info!(contractor_id = %id, "Contractor submitted step two documents");
            return Ok(contractor);
        }

        let current = self.get(id).await?;
        Err(DomainError::InvalidTransition {
            from: describe(&current),
            action: "submit documents for".to_string(),
        })
    }

    async fn apply(
        &self,
        id: Uuid,
        action: ModerationAction,
        step: Option<RegistrationStep>,
    ) -> DomainResult<Contractor> {
        let gate = |contractor: &Contractor| match step {
            Some(step) if contractor.registration_step != step => {
                Err(DomainError::InvalidTransition {
                    from: describe(contractor),
                    action: format!("{} {} of", action.name(), step.slug()),
                })
            }
            _ => Ok(()),
        };
        let outcome = moderate(&*self.contractors, RESOURCE, id, &action, gate).await?;
        let contractor = outcome.entity;

        if outcome.changed {
            info!(
                contractor_id = %contractor.id,
                action = action.name(),
                step = contractor.registration_step.as_u8(),
                status = %contractor.moderation.approval_status,
                blocked = contractor.moderation.is_blocked,
                "Contractor moderated"
            );
            let recipient = Recipient::new(
                AccountKind::Contractor,
                contractor.profile.email.clone(),
                contractor.display_name(),
            );
            let step = step.map(|s| s.as_u8());
            if let Some(event) = notification_for(&action, recipient, step, &contractor) {
                self.notifier.publish(event);
            }
        }

        Ok(contractor)
    }
}

fn describe(contractor: &Contractor) -> String {
    let mut state = format!(
        "{} at {}",
        contractor.moderation.approval_status, contractor.registration_step
    );
    if contractor.moderation.is_blocked {
        state.push_str(" and blocked");
    }
    state
}
