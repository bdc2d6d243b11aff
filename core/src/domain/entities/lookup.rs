//! Lookup entries: the job types and product types offered in the apps.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ImageAsset, Listable};

/// Which lookup table an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LookupKind {
    JobType,
    ProductType,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JobType => "job_type",
            Self::ProductType => "product_type",
        }
    }

    /// Human label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::JobType => "Job type",
            Self::ProductType => "Product type",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEntry {
    pub id: Uuid,
    pub kind: LookupKind,
    /// Unique per kind, compared case-insensitively
    pub name: String,
    pub image: ImageAsset,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LookupEntry {
    pub fn new(kind: LookupKind, name: String, image: ImageAsset) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind,
            name,
            image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

impl Listable for LookupEntry {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }
}
