//! Repository interfaces and their in-memory implementations.
//!
//! The infrastructure crate provides MySQL-backed implementations of the
//! same traits.

pub mod admin;
pub mod contractor;
pub mod lookup;
pub(crate) mod memory;
pub mod moderation;
pub mod store;
pub mod testimonial;
pub mod user;

pub use admin::{AdminRepository, InMemoryAdminRepository};
pub use contractor::{ContractorRepository, InMemoryContractorRepository};
pub use lookup::{InMemoryLookupRepository, LookupRepository};
pub use moderation::ModerationRepository;
pub use store::{InMemoryStoreRepository, StoreRepository};
pub use testimonial::{InMemoryTestimonialRepository, TestimonialRepository};
pub use user::{InMemoryUserRepository, UserRepository};
