//! Contractor entity with its two-step registration review.
//!
//! Step one covers the company details. Once approved, the contractor
//! uploads a licence and a GST document, which moves the record to step two
//! and back to `Pending` for a second review.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{
    ApprovalStatus, Listable, ModerationGuard, ModerationState, Moderated,
};
use crate::errors::{DomainError, ValidationError};

/// Registration step under review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RegistrationStep {
    One,
    Two,
}

impl RegistrationStep {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Route segment used by the dashboard (`step-one` / `step-two`)
    pub fn slug(&self) -> &'static str {
        match self {
            Self::One => "step-one",
            Self::Two => "step-two",
        }
    }
}

impl From<RegistrationStep> for u8 {
    fn from(step: RegistrationStep) -> Self {
        step.as_u8()
    }
}

impl TryFrom<u8> for RegistrationStep {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(ValidationError::OutOfRange {
                field: "registrationStep".to_string(),
                min: "1".to_string(),
                max: "2".to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Company details captured at signup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorProfile {
    pub company_name: String,
    pub contractor_name: String,
    pub email: String,
    pub phone: String,
    pub gst_number: String,
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default)]
    pub number_of_employees: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: Uuid,

    #[serde(flatten)]
    pub profile: ContractorProfile,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_document: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_document: Option<String>,

    pub registration_step: RegistrationStep,

    #[serde(flatten)]
    pub moderation: ModerationState,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Contractor {
    /// A freshly registered contractor awaiting step one review
    pub fn new(profile: ContractorProfile) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            profile,
            license_document: None,
            gst_document: None,
            registration_step: RegistrationStep::One,
            moderation: ModerationState::pending(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.profile.contractor_name
    }
}

impl Moderated for Contractor {
    fn moderation(&self) -> &ModerationState {
        &self.moderation
    }

    fn guard(&self) -> ModerationGuard {
        ModerationGuard {
            approval_status: self.moderation.approval_status,
            is_blocked: self.moderation.is_blocked,
            reviewed_at: self.moderation.reviewed_at,
            registration_step: Some(self.registration_step.as_u8()),
        }
    }
}

impl Listable for Contractor {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.profile.company_name,
            &self.profile.contractor_name,
            &self.profile.email,
            &self.profile.phone,
        ]
    }

    fn approval_status(&self) -> Option<ApprovalStatus> {
        Some(self.moderation.approval_status)
    }

    fn is_blocked(&self) -> Option<bool> {
        Some(self.moderation.is_blocked)
    }

    fn registration_step(&self) -> Option<u8> {
        Some(self.registration_step.as_u8())
    }
}
