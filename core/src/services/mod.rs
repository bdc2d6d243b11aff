//! Business services containing domain logic and use cases.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod contractor;
mod fields;
pub mod moderation;
pub mod notification;
pub mod storage;
pub mod store;
pub mod testimonial;
pub mod token;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use admin::{AdminChanges, AdminService, NewAdmin};
pub use auth::{
    AuthResponse, AuthService, BcryptPasswordHasher, InMemoryLoginRateLimiter,
    LoginRateLimiter, PasswordHasher,
};
pub use catalog::CatalogService;
pub use contractor::ContractorService;
pub use moderation::{moderate, ModerationOutcome};
pub use notification::{
    EmailMessage, EmailSender, NotificationError, NotificationPublisher, NotificationWorker,
    Outbox, OutboxReceiver, RecordingEmailSender, RecordingPublisher, RetryPolicy,
};
pub use storage::{AssetStorage, ImageUpload, InMemoryAssetStorage};
pub use store::StoreService;
pub use testimonial::{NewTestimonial, TestimonialChanges, TestimonialService};
pub use token::{SessionToken, TokenService, TokenServiceConfig};
pub use user::{NewUser, UserChanges, UserService};
