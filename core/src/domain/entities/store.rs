//! Store entity: a retail partner awaiting or holding approval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ApprovalStatus, Listable, ModerationState, Moderated};

/// Store details captured at signup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreProfile {
    pub store_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub gst_number: String,
    /// Licence document URL
    pub store_license: String,
    /// GST certificate URL
    pub gst_document: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,

    #[serde(flatten)]
    pub profile: StoreProfile,

    #[serde(flatten)]
    pub moderation: ModerationState,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn new(profile: StoreProfile) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            profile,
            moderation: ModerationState::pending(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Moderated for Store {
    fn moderation(&self) -> &ModerationState {
        &self.moderation
    }
}

impl Listable for Store {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.profile.store_name,
            &self.profile.owner_name,
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
}
