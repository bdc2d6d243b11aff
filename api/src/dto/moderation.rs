//! Moderation payloads

use serde::Deserialize;
use validator::Validate;

/// Reason shown to the contractor or store owner
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectRequest {
    #[validate(length(min = 1, max = 500, message = "Reason must be 1 to 500 characters"))]
    pub reason: String,
}
