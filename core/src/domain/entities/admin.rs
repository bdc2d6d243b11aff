//! Admin entity: a back-office operator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Listable;
use crate::errors::{DomainError, ValidationError};

/// Authorization role; the only policy flag in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
    Superadmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl Default for AdminRole {
    fn default() -> Self {
        Self::Admin
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            _ => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
            }
            .into()),
        }
    }
}

/// Admin account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,

    pub fullname: String,

    /// Stored lower-cased
    pub email: String,

    /// bcrypt hash; absent until the admin follows their setup link
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,

    pub role: AdminRole,

    pub is_blocked: bool,

    /// Human-facing staff identifier, unique across admins
    pub unique_id: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(
        fullname: String,
        email: String,
        unique_id: String,
        role: AdminRole,
        password_hash: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            fullname,
            email,
            password_hash,
            role,
            is_blocked: false,
            unique_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_superadmin(&self) -> bool {
        self.role == AdminRole::Superadmin
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Fields an edit may change; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminUpdate {
    pub fullname: Option<String>,
    pub role: Option<AdminRole>,
    pub password_hash: Option<String>,
}

impl AdminUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Listable for Admin {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.fullname, &self.email, &self.unique_id]
    }

    fn is_blocked(&self) -> Option<bool> {
        Some(self.is_blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_admin() {
        let admin = Admin::new(
            "Jane Doe".to_string(),
            "jane@example.com".to_string(),
            "ADM-001".to_string(),
            AdminRole::Admin,
            None,
        );
        assert!(!admin.is_blocked);
        assert!(!admin.is_superadmin());
        assert!(!admin.has_password());
        assert_eq!(admin.created_at, admin.updated_at);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let admin = Admin::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "ADM-002".to_string(),
            AdminRole::Superadmin,
            Some("$2b$04$secret".to_string()),
        );
        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "superadmin");
        assert_eq!(json["uniqueId"], "ADM-002");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("SuperAdmin".parse::<AdminRole>().unwrap(), AdminRole::Superadmin);
        assert!("owner".parse::<AdminRole>().is_err());
    }
}
