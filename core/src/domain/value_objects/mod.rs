//! Value objects representing immutable domain concepts.

pub mod image;
pub mod list_query;
pub mod moderation;

pub use image::ImageAsset;
pub use list_query::{paginate, ListFilter, ListQuery, Listable};
pub use moderation::{
    validate_rejection_reason, ApprovalStatus, ModerationAction, ModerationGuard, Moderated,
    ModerationState, Transition, MAX_REJECTION_REASON_LEN,
};
