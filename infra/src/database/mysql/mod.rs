//! MySQL repository implementations

mod admin_repository_impl;
mod contractor_repository_impl;
mod lookup_repository_impl;
mod moderation;
mod store_repository_impl;
mod testimonial_repository_impl;
mod user_repository_impl;

pub use admin_repository_impl::MySqlAdminRepository;
pub use contractor_repository_impl::MySqlContractorRepository;
pub use lookup_repository_impl::MySqlLookupRepository;
pub use store_repository_impl::MySqlStoreRepository;
pub use testimonial_repository_impl::MySqlTestimonialRepository;
pub use user_repository_impl::MySqlUserRepository;
