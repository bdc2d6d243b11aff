//! Request and response payloads. All JSON bodies use camelCase.

pub mod admin;
pub mod listing;
pub mod moderation;
pub mod upload;
pub mod user;

pub use admin::{
    AddAdminRequest, AdminEnvelope, EditAdminRequest, LoginRequest, LoginResponse,
    SetPasswordRequest,
};
pub use listing::ListParams;
pub use moderation::RejectRequest;
pub use upload::UploadForm;
pub use user::{AddUserRequest, EditUserRequest};
