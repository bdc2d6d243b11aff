//! Platform user administration

mod service;

#[cfg(test)]
mod tests;

pub use service::{NewUser, UserChanges, UserService};
