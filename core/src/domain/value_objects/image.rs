//! Stored image reference

use serde::{Deserialize, Serialize};

/// Public URL plus the storage key needed to delete the asset later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub url: String,
    pub public_id: String,
}

impl ImageAsset {
    pub fn new(url: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            public_id: public_id.into(),
        }
    }
}
