//! User entity representing a platform customer account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Listable;

/// Platform user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    pub name: String,

    /// Stored lower-cased, unique
    pub email: String,

    pub phone: String,

    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,

    pub is_blocked: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, phone: String, password_hash: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            is_blocked: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Listable for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.phone]
    }

    fn is_blocked(&self) -> Option<bool> {
        Some(self.is_blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new(
            "Sam".to_string(),
            "sam@example.com".to_string(),
            "0400000000".to_string(),
            None,
        );
        assert!(!user.is_blocked);
        assert_eq!(user.search_fields(), vec!["Sam", "sam@example.com", "0400000000"]);
    }
}
