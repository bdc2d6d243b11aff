//! Domain entities representing core business objects.

pub mod admin;
pub mod contractor;
pub mod lookup;
pub mod store;
pub mod testimonial;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use admin::{Admin, AdminRole, AdminUpdate};
pub use contractor::{Contractor, ContractorProfile, RegistrationStep};
pub use lookup::{LookupEntry, LookupKind};
pub use store::{Store, StoreProfile};
pub use testimonial::{validate_rating, Testimonial, MAX_RATING, MIN_RATING};
pub use token::{Claims, TokenPurpose};
pub use user::User;
