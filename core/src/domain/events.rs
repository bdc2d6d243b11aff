//! Domain events that trigger outbound notifications.

use std::fmt;

/// Kind of account a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    User,
    Admin,
    Contractor,
    Store,
}

impl AccountKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Contractor => "contractor",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who receives a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub kind: AccountKind,
    pub email: String,
    pub name: String,
}

impl Recipient {
    pub fn new(kind: AccountKind, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Something happened that the affected account should hear about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Approved {
        recipient: Recipient,
        /// Contractor registration step, if any
        step: Option<u8>,
    },
    Rejected {
        recipient: Recipient,
        step: Option<u8>,
        reason: String,
    },
    Blocked {
        recipient: Recipient,
    },
    Unblocked {
        recipient: Recipient,
    },
    /// A new admin must choose a password through the setup link
    AdminInvited {
        recipient: Recipient,
        setup_url: String,
    },
}

impl NotificationEvent {
    pub fn recipient(&self) -> &Recipient {
        match self {
            Self::Approved { recipient, .. }
            | Self::Rejected { recipient, .. }
            | Self::Blocked { recipient }
            | Self::Unblocked { recipient }
            | Self::AdminInvited { recipient, .. } => recipient,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Approved { .. } => "approved",
            Self::Rejected { .. } => "rejected",
            Self::Blocked { .. } => "blocked",
            Self::Unblocked { .. } => "unblocked",
            Self::AdminInvited { .. } => "admin_invited",
        }
    }
}
