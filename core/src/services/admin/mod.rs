//! Admin account management
//!
//! Role rules:
//! - only a superadmin may create a superadmin or change anyone's role
//! - only a superadmin may edit a superadmin account
//! - superadmin accounts can be neither blocked nor deleted

mod service;

#[cfg(test)]
mod tests;

pub use service::{AdminChanges, AdminService, NewAdmin};
