//! Store review and moderation

mod service;

#[cfg(test)]
mod tests;

pub use service::StoreService;
