//! Admin login, session and management payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use bo_core::domain::entities::admin::{Admin, AdminRole};
use bo_core::errors::DomainError;
use bo_core::services::admin::{AdminChanges, NewAdmin};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body of a successful login; the token is also set as a cookie
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub admin: Admin,
    pub token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct AdminEnvelope {
    pub admin: Admin,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddAdminRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1 to 100 characters"))]
    pub fullname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub password: Option<String>,
    pub role: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Unique id must be 1 to 50 characters"))]
    pub unique_id: String,
}

impl AddAdminRequest {
    pub fn into_new_admin(self) -> Result<NewAdmin, DomainError> {
        let role = match self.role.as_deref() {
            Some(role) => role.parse()?,
            None => AdminRole::Admin,
        };
        Ok(NewAdmin {
            fullname: self.fullname,
            email: self.email,
            password: self.password.filter(|p| !p.is_empty()),
            role,
            unique_id: self.unique_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditAdminRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1 to 100 characters"))]
    pub fullname: Option<String>,
    /// Accepted only when equal to the stored email
    pub email: Option<String>,
    pub role: Option<String>,
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub password: Option<String>,
}

impl EditAdminRequest {
    pub fn into_changes(self) -> Result<AdminChanges, DomainError> {
        let role = self.role.as_deref().map(str::parse).transpose()?;
        Ok(AdminChanges {
            fullname: self.fullname,
            email: self.email,
            role,
            password: self.password.filter(|p| !p.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_admin_defaults_to_admin_role() {
        let request: AddAdminRequest = serde_json::from_value(serde_json::json!({
            "fullname": "Dana Ops",
            "email": "dana@example.com",
            "uniqueId": "OPS-7"
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let admin = request.into_new_admin().unwrap();
        assert_eq!(admin.role, AdminRole::Admin);
        assert_eq!(admin.password, None);
        assert_eq!(admin.unique_id, "OPS-7");
    }

    #[test]
    fn rejects_unknown_role() {
        let request = EditAdminRequest {
            role: Some("owner".to_string()),
            ..EditAdminRequest::default()
        };
        assert!(request.into_changes().is_err());
    }

    #[test]
    fn short_password_fails_validation() {
        let request: AddAdminRequest = serde_json::from_value(serde_json::json!({
            "fullname": "Dana Ops",
            "email": "dana@example.com",
            "password": "short",
            "uniqueId": "OPS-7"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
