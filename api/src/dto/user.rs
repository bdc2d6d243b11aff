//! User management payloads

use serde::Deserialize;
use validator::Validate;

use bo_core::services::user::{NewUser, UserChanges};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "Phone must be 7 to 20 characters"))]
    pub phone: String,
    #[validate(length(min = 8, max = 72, message = "Password must be 8 to 72 characters"))]
    pub password: Option<String>,
}

impl From<AddUserRequest> for NewUser {
    fn from(request: AddUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password: request.password.filter(|p| !p.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    /// Accepted only when equal to the stored email
    pub email: Option<String>,
    #[validate(length(min = 7, max = 20, message = "Phone must be 7 to 20 characters"))]
    pub phone: Option<String>,
}

impl From<EditUserRequest> for UserChanges {
    fn from(request: EditUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
        }
    }
}
