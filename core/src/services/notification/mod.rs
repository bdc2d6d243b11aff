//! Outbound notifications.
//!
//! Services publish [`NotificationEvent`]s to an outbox without waiting.
//! A background [`NotificationWorker`] drains the outbox, renders each
//! event with [`templates::render`] and hands it to an [`EmailSender`],
//! retrying with backoff. Delivery failures never reach the request that
//! triggered them.
//!
//! [`NotificationEvent`]: crate::domain::events::NotificationEvent

mod outbox;
mod sender;
pub mod templates;
mod worker;


pub use outbox::{NotificationPublisher, Outbox, OutboxReceiver, RecordingPublisher};
pub use sender::{EmailMessage, EmailSender, NotificationError, RecordingEmailSender};
pub use worker::{NotificationWorker, RetryPolicy};
