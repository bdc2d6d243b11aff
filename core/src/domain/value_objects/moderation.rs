//! Moderation state shared by contractors and stores.
//!
//! The state machine is pure: [`ModerationState::apply`] computes the next
//! state for an action without touching storage. Persisting the result is a
//! compare-and-set keyed on [`ModerationGuard`], see
//! `services::moderation::moderate`.
//!
//! | from \ action | approve  | reject    | block/unblock | reopen  |
//! |---------------|----------|-----------|---------------|---------|
//! | Pending       | Approved | Rejected  | invalid       | no-op   |
//! | Approved      | no-op    | invalid   | toggles flag  | invalid |
//! | Rejected      | invalid  | no-op     | toggles flag  | Pending |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, ValidationError};

/// Longest accepted rejection reason, in characters
pub const MAX_REJECTION_REASON_LEN: usize = 500;

/// Review outcome of a moderated account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ValidationError::InvalidFormat {
                field: "approvalStatus".to_string(),
            }
            .into()),
        }
    }
}

/// Moderation action requested by an admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject { reason: String },
    Block,
    Unblock,
    Reopen,
}

impl ModerationAction {
    pub fn reject(reason: impl Into<String>) -> Self {
        Self::Reject {
            reason: reason.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
            Self::Block => "block",
            Self::Unblock => "unblock",
            Self::Reopen => "reopen",
        }
    }
}

/// Result of applying an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Changed(ModerationState),
    Unchanged,
}

/// The prior state a conditional update expects to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModerationGuard {
    pub approval_status: ApprovalStatus,
    pub is_blocked: bool,
    /// Changes on every review, so a reject, reopen, reject cycle between a
    /// read and its write is still detected
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Only contractors carry a registration step
    pub registration_step: Option<u8>,
}

/// Moderation fields embedded in contractor and store records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationState {
    pub approval_status: ApprovalStatus,
    pub is_blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Default for ModerationState {
    fn default() -> Self {
        Self::pending()
    }
}

impl ModerationState {
    /// Fresh state for a newly registered account
    pub fn pending() -> Self {
        Self {
            approval_status: ApprovalStatus::Pending,
            is_blocked: false,
            rejection_reason: None,
            reviewed_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.approval_status == ApprovalStatus::Pending
    }

    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }

    pub fn is_rejected(&self) -> bool {
        self.approval_status == ApprovalStatus::Rejected
    }

    /// Compute the state after `action`.
    ///
    /// Returns `Unchanged` for idempotent repeats so callers can skip both
    /// the write and the notification.
    pub fn apply(
        &self,
        action: &ModerationAction,
        now: DateTime<Utc>,
    ) -> Result<Transition, DomainError> {
        use ApprovalStatus::*;

        match (action, self.approval_status) {
            (ModerationAction::Approve, Pending) => Ok(Transition::Changed(Self {
                approval_status: Approved,
                is_blocked: false,
                rejection_reason: None,
                reviewed_at: Some(now),
            })),
            (ModerationAction::Approve, Approved) => Ok(Transition::Unchanged),

            (ModerationAction::Reject { reason }, status) => {
                let reason = validate_rejection_reason(reason)?;
                match status {
                    Pending => Ok(Transition::Changed(Self {
                        approval_status: Rejected,
                        is_blocked: false,
                        rejection_reason: Some(reason),
                        reviewed_at: Some(now),
                    })),
                    Rejected => Ok(Transition::Unchanged),
                    Approved => Err(self.invalid(action)),
                }
            }

            (ModerationAction::Block, Approved | Rejected) => Ok(self.with_blocked(true, now)),
            (ModerationAction::Unblock, Approved | Rejected) => Ok(self.with_blocked(false, now)),

            (ModerationAction::Reopen, Rejected) if !self.is_blocked => {
                Ok(Transition::Changed(Self {
                    approval_status: Pending,
                    is_blocked: false,
                    rejection_reason: self.rejection_reason.clone(),
                    reviewed_at: None,
                }))
            }
            (ModerationAction::Reopen, Pending) => Ok(Transition::Unchanged),

            _ => Err(self.invalid(action)),
        }
    }

    fn with_blocked(&self, blocked: bool, now: DateTime<Utc>) -> Transition {
        if self.is_blocked == blocked {
            return Transition::Unchanged;
        }
        Transition::Changed(Self {
            is_blocked: blocked,
            reviewed_at: Some(now),
            ..self.clone()
        })
    }

    fn invalid(&self, action: &ModerationAction) -> DomainError {
        let from = if self.is_blocked {
            format!("{} and blocked", self.approval_status)
        } else {
            self.approval_status.to_string()
        };
        DomainError::InvalidTransition {
            from,
            action: action.name().to_string(),
        }
    }
}

/// Records carrying a [`ModerationState`]
pub trait Moderated {
    fn moderation(&self) -> &ModerationState;

    /// Expected prior state for a conditional update of this record
    fn guard(&self) -> ModerationGuard {
        let state = self.moderation();
        ModerationGuard {
            approval_status: state.approval_status,
            is_blocked: state.is_blocked,
            reviewed_at: state.reviewed_at,
            registration_step: None,
        }
    }
}

/// Trim a rejection reason and enforce its bounds
pub fn validate_rejection_reason(reason: &str) -> Result<String, DomainError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ValidationError::required("reason").into());
    }
    if reason.chars().count() > MAX_REJECTION_REASON_LEN {
        return Err(ValidationError::TooLong {
            field: "reason".to_string(),
            max: MAX_REJECTION_REASON_LEN,
        }
        .into());
    }
    Ok(reason.to_string())
}
